//! Airline Demand - air-travel demand and revenue allocation engine
//!
//! Estimates how much travel flows between metropolitan markets, turns
//! that demand into weekly dollars per cabin and divides the dollars among
//! competing flights by reputation, up to each flight's seat capacity.

pub mod core;
pub mod data;
pub mod demand;
pub mod market;
pub mod revenue;
pub mod simulation;
