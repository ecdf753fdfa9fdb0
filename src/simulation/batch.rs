//! Parallel batch runs over many routes
//!
//! Every request only reads the shared reference data, so requests run
//! independently on the rayon pool and come back in request order.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::MarketId;
use crate::demand::DemandContext;
use crate::revenue::FlightOffering;

use super::route::{RouteRevenue, RouteSimulator};

/// Where a simulated route goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// A single airport, by IATA code
    Airport(String),
    /// Every airport of a market
    Market(MarketId),
}

/// One route to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Origin IATA code
    pub origin: String,
    pub destination: RouteTarget,
}

impl RouteRequest {
    pub fn airport(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: RouteTarget::Airport(destination.into()),
        }
    }

    pub fn market(origin: impl Into<String>, destination: MarketId) -> Self {
        Self {
            origin: origin.into(),
            destination: RouteTarget::Market(destination),
        }
    }
}

/// Simulate one request
pub fn run_request(
    simulator: &RouteSimulator,
    ctx: &DemandContext<'_>,
    request: &RouteRequest,
    date: NaiveDate,
    offerings: &[FlightOffering],
) -> Result<RouteRevenue> {
    let origin = ctx.reference.airport_by_iata(&request.origin)?;
    match &request.destination {
        RouteTarget::Airport(code) => {
            let destination = ctx.reference.airport_by_iata(code)?;
            simulator.simulate_route(ctx, origin, destination, date, offerings)
        }
        RouteTarget::Market(market) => simulator.simulate_market(ctx, origin, *market, date, offerings),
    }
}

/// Simulate every request in parallel, results in request order
pub fn simulate_batch(
    ctx: &DemandContext<'_>,
    requests: &[RouteRequest],
    date: NaiveDate,
    offerings: &[FlightOffering],
) -> Vec<Result<RouteRevenue>> {
    warn_unknown_airports(ctx, offerings);

    let simulator = RouteSimulator::new();
    tracing::debug!("Simulating {} routes for {}", requests.len(), date);

    requests
        .par_iter()
        .map(|request| run_request(&simulator, ctx, request, date, offerings))
        .collect()
}

/// Offerings naming an airport that is not in the reference data never match a route
fn warn_unknown_airports(ctx: &DemandContext<'_>, offerings: &[FlightOffering]) {
    for offering in offerings {
        for code in [&offering.origin, &offering.destination] {
            if ctx.reference.airport_by_iata(code).is_err() {
                tracing::warn!("Offering {:?} references unknown airport {}", offering.id, code);
            }
        }
    }
}
