//! Revenue potential of a route
//!
//! Turns relative demand into dollars. Each origin market has a yearly
//! travel budget per segment; a route earns the slice of that budget
//! matching its slice of the market's outbound demand. Business travel
//! draws on the business and government budgets, leisure travel on the
//! leisure and tourist budgets. The class splitter then spreads both
//! across cabins and the result is expressed per week.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{ClassDollars, DemandSegment, MarketId, ServiceClass, TravelerType, WEEKS_PER_YEAR};
use crate::demand::{ClassSplit, DemandContext, MarketAggregator, SegmentDemand};
use crate::market::{distance, Airport, Market};

use super::allocator::RevenuePool;

/// Yearly dollars per demand segment
pub type SegmentDollars = SegmentDemand;

/// Maximum revenue a route could earn if it captured all of its demand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePotential {
    pub distance: f64,
    /// Yearly business-traveler dollars (business + government)
    pub business_dollars: f64,
    /// Yearly leisure-traveler dollars (leisure + tourist)
    pub leisure_dollars: f64,
    /// Weekly dollars per cabin
    pub weekly: ClassDollars,
}

/// Weekly revenue potential restricted to a set of routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedPotential {
    /// Origin IATA code; empty matches any
    pub origin_restriction: String,
    /// Destination IATA code; empty matches any
    pub destination_restriction: String,
    pub potential: RevenuePotential,
}

impl ScopedPotential {
    pub fn pool(&self, class: ServiceClass) -> RevenuePool {
        RevenuePool::scoped(
            self.potential.weekly.get(class),
            self.origin_restriction.clone(),
            self.destination_restriction.clone(),
        )
    }
}

/// Prices route demand; every number it uses comes from the call's context
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenuePotentialCalculator {
    aggregator: MarketAggregator,
}

impl RevenuePotentialCalculator {
    pub fn new() -> Self {
        Self {
            aggregator: MarketAggregator::new(),
        }
    }

    /// Yearly air-travel spending of a market's residents, per segment
    pub fn market_dollars(&self, ctx: &DemandContext<'_>, market: &Market, date: NaiveDate) -> Result<SegmentDollars> {
        let wealth = market.population_at(date)? * market.income;
        let spending = &ctx.config.spending;
        Ok(SegmentDollars::default().map(|segment, _| wealth * spending.share(segment)))
    }

    /// The part of its market's spending an airport can draw on
    pub fn airport_dollars(&self, ctx: &DemandContext<'_>, airport: &Airport, date: NaiveDate) -> Result<SegmentDollars> {
        let market = ctx.reference.market_of(airport)?;
        let fraction = airport.catchment_fraction(market);
        let dollars = self.market_dollars(ctx, market, date)?;
        Ok(dollars.map(|_, value| value * fraction))
    }

    /// Weekly potential for one airport pair
    pub fn weekly_potential(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: &Airport,
        date: NaiveDate,
    ) -> Result<RevenuePotential> {
        let pools = self.airport_dollars(ctx, origin, date)?;
        let totals = self.aggregator.outbound_total(ctx, origin, date)?;
        let shares = ctx.models().pair_demand(ctx, origin, destination, date)?;
        let distance = distance::between(origin.location, destination.location);

        Ok(potential(ctx.config, &pools, &shares, &totals, distance))
    }

    /// Weekly potential from an airport into a whole market, split into pools.
    ///
    /// The largest shared-catchment component becomes a pool open to any
    /// destination airport of the market; each airport's exclusive
    /// component becomes a pool only flights into that airport can take.
    pub fn market_pools(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: MarketId,
        date: NaiveDate,
    ) -> Result<Vec<ScopedPotential>> {
        let market = ctx.reference.market(destination)?;
        let pools = self.airport_dollars(ctx, origin, date)?;
        let totals = self.aggregator.outbound_total(ctx, origin, date)?;
        let breakdown = self.aggregator.destination_breakdown(ctx, origin, destination, date)?;

        let mut scoped = Vec::with_capacity(breakdown.airports.len() + 1);
        scoped.push(ScopedPotential {
            origin_restriction: origin.iata.clone(),
            destination_restriction: String::new(),
            potential: potential(
                ctx.config,
                &pools,
                &breakdown.shared,
                &totals,
                distance::between(origin.location, market.location),
            ),
        });

        for (airport_id, shares) in breakdown.airports.iter().zip(&breakdown.exclusive) {
            let airport = ctx.reference.airport(*airport_id)?;
            scoped.push(ScopedPotential {
                origin_restriction: origin.iata.clone(),
                destination_restriction: airport.iata.clone(),
                potential: potential(
                    ctx.config,
                    &pools,
                    shares,
                    &totals,
                    distance::between(origin.location, airport.location),
                ),
            });
        }

        Ok(scoped)
    }
}

fn potential(
    config: &SimulationConfig,
    pools: &SegmentDollars,
    shares: &SegmentDemand,
    totals: &SegmentDemand,
    distance: f64,
) -> RevenuePotential {
    let business_dollars = traveler_dollars(TravelerType::Business, pools, shares, totals);
    let leisure_dollars = traveler_dollars(TravelerType::Leisure, pools, shares, totals);
    let split = ClassSplit::for_distance(distance, &config.class_split);

    let weekly = |class: ServiceClass| {
        (business_dollars * split.business_travelers.get(class) + leisure_dollars * split.leisure_travelers.get(class))
            / WEEKS_PER_YEAR
    };

    RevenuePotential {
        distance,
        business_dollars,
        leisure_dollars,
        weekly: ClassDollars {
            business: weekly(ServiceClass::Business),
            premium_economy: weekly(ServiceClass::PremiumEconomy),
            economy: weekly(ServiceClass::Economy),
        },
    }
}

/// Blend of the traveler type's two segment budgets, each weighted by the route's share of that segment
pub fn traveler_dollars(
    traveler: TravelerType,
    pools: &SegmentDollars,
    shares: &SegmentDemand,
    totals: &SegmentDemand,
) -> f64 {
    let (a, b) = traveler.segments();
    segment_dollars(a, pools, shares, totals) + segment_dollars(b, pools, shares, totals)
}

fn segment_dollars(segment: DemandSegment, pools: &SegmentDollars, shares: &SegmentDemand, totals: &SegmentDemand) -> f64 {
    let total = totals.get(segment);
    if total <= 0.0 {
        // No demand leaves the market in this segment
        return 0.0;
    }
    pools.get(segment) * shares.get(segment) / total
}
