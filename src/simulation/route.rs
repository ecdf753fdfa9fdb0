//! Route and market simulation
//!
//! Prices the demand out of an origin airport, ranks the offerings that
//! compete for it and allocates each cabin's pools across their rotations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{AirlineId, ClassDollars, MarketId, OfferingId, ServiceClass};
use crate::demand::DemandContext;
use crate::market::Airport;
use crate::revenue::{
    FlightOffering, RevenueAllocator, RevenuePool, RevenuePotentialCalculator, RouteReputationModel, UnitId,
};

/// Weekly revenue of one capacity unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRevenue {
    pub unit: UnitId,
    pub offering: OfferingId,
    pub dollars: f64,
    pub passengers: f64,
    pub ceiling: f64,
}

/// Weekly revenue of one offering, summed over its rotations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfferingRevenue {
    pub offering: OfferingId,
    pub airline: AirlineId,
    pub service_class: ServiceClass,
    pub reputation: f64,
    pub dollars: f64,
    pub passengers: f64,
    pub capacity: f64,
}

impl OfferingRevenue {
    /// Share of seat capacity sold, in [0, 1]
    pub fn load_factor(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        (self.dollars / self.capacity).min(1.0)
    }
}

/// Outcome of simulating a route or market for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRevenue {
    /// Origin IATA code
    pub origin: String,
    /// Destination IATA code, or market name for market simulations
    pub destination: String,
    pub date: NaiveDate,
    /// Weekly dollars available per cabin
    pub potential: ClassDollars,
    pub units: Vec<UnitRevenue>,
    pub offerings: Vec<OfferingRevenue>,
    /// Weekly dollars no unit could absorb, per cabin
    pub unallocated: ClassDollars,
}

impl RouteRevenue {
    pub fn total_dollars(&self) -> f64 {
        self.units.iter().map(|u| u.dollars).sum()
    }

    pub fn total_passengers(&self) -> f64 {
        self.units.iter().map(|u| u.passengers).sum()
    }

    pub fn offering(&self, id: OfferingId) -> Option<&OfferingRevenue> {
        self.offerings.iter().find(|o| o.offering == id)
    }
}

/// Passengers carried for `dollars` of revenue at a round-trip `fare`.
///
/// Half of the revenue is attributed to each direction of the trip.
pub fn passengers_for(dollars: f64, fare: f64) -> f64 {
    if fare <= 0.0 {
        return 0.0;
    }
    dollars / fare / 2.0
}

/// Runs routes and markets against whatever context each call is given.
///
/// Holds no config of its own, so one simulator serves a whole batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSimulator {
    calculator: RevenuePotentialCalculator,
}

impl RouteSimulator {
    pub fn new() -> Self {
        Self {
            calculator: RevenuePotentialCalculator::new(),
        }
    }

    pub fn calculator(&self) -> &RevenuePotentialCalculator {
        &self.calculator
    }

    /// One week of competition on a single airport pair
    pub fn simulate_route(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: &Airport,
        date: NaiveDate,
        offerings: &[FlightOffering],
    ) -> Result<RouteRevenue> {
        let potential = self.calculator.weekly_potential(ctx, origin, destination, date)?;
        let competing: Vec<&FlightOffering> = offerings
            .iter()
            .filter(|o| o.serves(&origin.iata, &destination.iata))
            .collect();

        tracing::debug!(
            "Route {}-{}: {:.2} weekly dollars, {} offerings",
            origin.iata,
            destination.iata,
            potential.weekly.total(),
            competing.len()
        );

        let pools = |class: ServiceClass| {
            vec![RevenuePool::scoped(
                potential.weekly.get(class),
                origin.iata.clone(),
                destination.iata.clone(),
            )]
        };

        Ok(compete(
            ctx.config,
            origin.iata.clone(),
            destination.iata.clone(),
            date,
            pools,
            &competing,
        ))
    }

    /// One week of competition between an airport and every airport of a market
    pub fn simulate_market(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: MarketId,
        date: NaiveDate,
        offerings: &[FlightOffering],
    ) -> Result<RouteRevenue> {
        let market = ctx.reference.market(destination)?;
        let scoped = self.calculator.market_pools(ctx, origin, destination, date)?;
        let codes: Vec<&str> = ctx.reference.airports_in(destination).map(|a| a.iata.as_str()).collect();
        let competing: Vec<&FlightOffering> = offerings
            .iter()
            .filter(|o| o.origin == origin.iata && codes.contains(&o.destination.as_str()))
            .collect();

        tracing::debug!(
            "Market {}-{}: {} pools over {} airports, {} offerings",
            origin.iata,
            market.name,
            scoped.len(),
            codes.len(),
            competing.len()
        );

        let pools = |class: ServiceClass| scoped.iter().map(|s| s.pool(class)).collect::<Vec<_>>();

        Ok(compete(ctx.config, origin.iata.clone(), market.name.clone(), date, pools, &competing))
    }
}

fn compete(
    config: &SimulationConfig,
    origin: String,
    destination: String,
    date: NaiveDate,
    pools_for: impl Fn(ServiceClass) -> Vec<RevenuePool>,
    competing: &[&FlightOffering],
) -> RouteRevenue {
    let mut revenue = RouteRevenue {
        origin,
        destination,
        date,
        potential: ClassDollars::default(),
        units: Vec::new(),
        offerings: Vec::new(),
        unallocated: ClassDollars::default(),
    };

    let scorer = RouteReputationModel::new(config.reputation);
    let allocator = RevenueAllocator::new(config.allocator);

    for class in ServiceClass::ALL {
        let pools = pools_for(class);
        revenue.potential.set(class, pools.iter().map(|p| p.amount.max(0.0)).sum());

        let cabin: Vec<&FlightOffering> = competing.iter().copied().filter(|o| o.service_class == class).collect();
        let inputs: Vec<_> = cabin.iter().map(|o| o.reputation_input()).collect();
        let reputations = scorer.reputations(&inputs);

        let units: Vec<_> = cabin
            .iter()
            .zip(&reputations)
            .flat_map(|(offering, &reputation)| offering.capacity_units(reputation))
            .collect();

        let outcome = allocator.allocate(&pools, &units);
        revenue.unallocated.set(class, outcome.unallocated());

        tracing::debug!(
            "{:?} cabin: {:.2} allocated to {} units in {} passes, {:.2} left",
            class,
            outcome.total_allocated(),
            units.len(),
            outcome.iterations,
            outcome.unallocated()
        );

        for (offering, &reputation) in cabin.iter().zip(&reputations) {
            let mut summary = OfferingRevenue {
                offering: offering.id,
                airline: offering.airline,
                service_class: class,
                reputation,
                dollars: 0.0,
                passengers: 0.0,
                capacity: 0.0,
            };

            for allocation in outcome.allocations.iter().filter(|a| a.unit.offering == offering.id) {
                let passengers = passengers_for(allocation.dollars, offering.fare);
                revenue.units.push(UnitRevenue {
                    unit: allocation.unit,
                    offering: offering.id,
                    dollars: allocation.dollars,
                    passengers,
                    ceiling: allocation.ceiling,
                });
                summary.dollars += allocation.dollars;
                summary.passengers += passengers;
                summary.capacity += allocation.ceiling;
            }

            revenue.offerings.push(summary);
        }
    }

    revenue
}

/// One week of competition on a single airport pair
pub fn simulate_route(
    ctx: &DemandContext<'_>,
    origin: &Airport,
    destination: &Airport,
    date: NaiveDate,
    offerings: &[FlightOffering],
) -> Result<RouteRevenue> {
    RouteSimulator::new().simulate_route(ctx, origin, destination, date, offerings)
}

/// One week of competition between an airport and every airport of a market
pub fn simulate_market(
    ctx: &DemandContext<'_>,
    origin: &Airport,
    destination: MarketId,
    date: NaiveDate,
    offerings: &[FlightOffering],
) -> Result<RouteRevenue> {
    RouteSimulator::new().simulate_market(ctx, origin, destination, date, offerings)
}
