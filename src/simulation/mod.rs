//! Weekly route simulation
//!
//! Ties demand, revenue potential, reputation and allocation together for
//! one route, one market or a whole batch of routes.

pub mod batch;
pub mod route;

pub use batch::{run_request, simulate_batch, RouteRequest, RouteTarget};
pub use route::{
    passengers_for, simulate_market, simulate_route, OfferingRevenue, RouteRevenue, RouteSimulator, UnitRevenue,
};
