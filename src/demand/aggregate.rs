//! Market-level demand aggregation
//!
//! A market's residents split into a shared catchment, reachable through
//! any of its airports, and per-airport exclusive catchments. The shared
//! part goes to whichever airport draws it best, so only the largest
//! shared component counts. Exclusive parts always add up.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::segment::SegmentDemand;
use super::DemandContext;
use crate::core::error::Result;
use crate::core::types::{AirportId, DemandSegment, MarketId};
use crate::market::{Airport, Market};

/// One side of a demand query: a specific airport or every airport of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Airport(AirportId),
    Market(MarketId),
}

/// Shared and exclusive components of a market's demand
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatchmentBreakdown {
    /// Largest shared component over all airports
    pub shared: f64,
    /// Exclusive component per airport, in input order
    pub exclusive: Vec<f64>,
}

impl CatchmentBreakdown {
    /// Split per-airport `(demand, exclusive_catchment)` pairs under a market's shared catchment
    pub fn split(shared_catchment: f64, airports: &[(f64, f64)]) -> Self {
        let mut shared: f64 = 0.0;
        let mut exclusive = Vec::with_capacity(airports.len());

        for &(demand, exclusive_catchment) in airports {
            let catchment = shared_catchment + exclusive_catchment;
            if catchment <= 0.0 {
                // Airport draws on nobody
                exclusive.push(0.0);
                continue;
            }
            shared = shared.max(demand * shared_catchment / catchment);
            exclusive.push(demand * exclusive_catchment / catchment);
        }

        Self { shared, exclusive }
    }

    pub fn total(&self) -> f64 {
        self.shared + self.exclusive.iter().sum::<f64>()
    }
}

/// Demand from one origin airport into each airport of a destination market
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationBreakdown {
    pub airports: Vec<AirportId>,
    /// Largest shared component, per segment
    pub shared: SegmentDemand,
    /// Exclusive components, parallel to `airports`
    pub exclusive: Vec<SegmentDemand>,
}

impl DestinationBreakdown {
    pub fn total(&self) -> SegmentDemand {
        self.shared.map(|segment, shared| {
            shared + self.exclusive.iter().map(|e| e.get(segment)).sum::<f64>()
        })
    }
}

/// Combines airport-pair demand into market-level demand.
///
/// Holds no state; curves and borders come from the context of each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketAggregator;

impl MarketAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Demand between two endpoints for every segment.
    ///
    /// Each concrete airport pair is evaluated once; the catchment rule is
    /// applied on the destination side first, then on the origin side.
    pub fn demand(
        &self,
        ctx: &DemandContext<'_>,
        origin: Endpoint,
        destination: Endpoint,
        date: NaiveDate,
    ) -> Result<SegmentDemand> {
        let (origin_market, origins) = resolve(ctx, origin)?;
        let (destination_market, destinations) = resolve(ctx, destination)?;

        let mut rows = Vec::with_capacity(origins.len());
        for origin_airport in &origins {
            let mut cells = Vec::with_capacity(destinations.len());
            for destination_airport in &destinations {
                cells.push(ctx.models().pair_demand(ctx, origin_airport, destination_airport, date)?);
            }
            rows.push(reduce(destination_market, &destinations, &cells));
        }

        Ok(reduce(origin_market, &origins, &rows))
    }

    /// Demand for one segment from an airport into a market
    pub fn market_demand(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: MarketId,
        segment: DemandSegment,
        date: NaiveDate,
    ) -> Result<f64> {
        let demand = self.demand(ctx, Endpoint::Airport(origin.id), Endpoint::Market(destination), date)?;
        Ok(demand.get(segment))
    }

    /// Shared and exclusive components from an airport into a market
    pub fn destination_breakdown(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: MarketId,
        date: NaiveDate,
    ) -> Result<DestinationBreakdown> {
        let market = ctx.reference.market(destination)?;
        let airports: Vec<&Airport> = ctx.reference.airports_in(destination).collect();

        let mut cells = Vec::with_capacity(airports.len());
        for airport in &airports {
            cells.push(ctx.models().pair_demand(ctx, origin, airport, date)?);
        }

        let mut shared = SegmentDemand::default();
        let mut exclusive = vec![SegmentDemand::default(); airports.len()];
        for segment in DemandSegment::ALL {
            let breakdown = split_segment(market, &airports, &cells, segment);
            shared.set(segment, breakdown.shared);
            for (slot, value) in exclusive.iter_mut().zip(breakdown.exclusive) {
                slot.set(segment, value);
            }
        }

        Ok(DestinationBreakdown {
            airports: airports.iter().map(|a| a.id).collect(),
            shared,
            exclusive,
        })
    }

    /// Demand from an airport into every other market, summed
    pub fn outbound_total(&self, ctx: &DemandContext<'_>, origin: &Airport, date: NaiveDate) -> Result<SegmentDemand> {
        let mut total = SegmentDemand::default();
        for market in ctx.reference.markets() {
            if market.id == origin.market {
                continue;
            }
            let demand = self.demand(ctx, Endpoint::Airport(origin.id), Endpoint::Market(market.id), date)?;
            total = total.map(|segment, sum| sum + demand.get(segment));
        }
        Ok(total)
    }
}

/// Airports behind an endpoint, with their market when the whole market is meant
fn resolve<'a>(ctx: &DemandContext<'a>, endpoint: Endpoint) -> Result<(Option<&'a Market>, Vec<&'a Airport>)> {
    match endpoint {
        Endpoint::Airport(id) => Ok((None, vec![ctx.reference.airport(id)?])),
        Endpoint::Market(id) => {
            let market = ctx.reference.market(id)?;
            Ok((Some(market), ctx.reference.airports_in(id).collect()))
        }
    }
}

fn reduce(market: Option<&Market>, airports: &[&Airport], values: &[SegmentDemand]) -> SegmentDemand {
    match market {
        None => values.first().copied().unwrap_or_default(),
        Some(market) => {
            let mut out = SegmentDemand::default();
            for segment in DemandSegment::ALL {
                out.set(segment, split_segment(market, airports, values, segment).total());
            }
            out
        }
    }
}

fn split_segment(
    market: &Market,
    airports: &[&Airport],
    values: &[SegmentDemand],
    segment: DemandSegment,
) -> CatchmentBreakdown {
    let parts: Vec<(f64, f64)> = airports
        .iter()
        .zip(values)
        .map(|(airport, demand)| (demand.get(segment), airport.exclusive_catchment))
        .collect();
    CatchmentBreakdown::split(market.shared_catchment, &parts)
}
