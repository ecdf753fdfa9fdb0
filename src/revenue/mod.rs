//! Turning demand into dollars and dollars into flights
//!
//! `potential` prices a route's demand, `reputation` ranks competing
//! offerings and `allocator` hands each offering its share of the pools.

pub mod allocator;
pub mod offering;
pub mod potential;
pub mod reputation;

pub use allocator::{Allocation, AllocationOutcome, CapacityUnit, RevenueAllocator, RevenuePool, UnitId};
pub use offering::{FlightOffering, Rotation};
pub use potential::{RevenuePotential, RevenuePotentialCalculator, ScopedPotential};
pub use reputation::{ReputationScore, RouteReputationInput, RouteReputationModel};
