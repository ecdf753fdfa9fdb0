//! Flight offerings and the capacity units they contribute

use serde::{Deserialize, Serialize};

use super::allocator::{CapacityUnit, UnitId};
use super::reputation::RouteReputationInput;
use crate::core::types::{AirlineId, OfferingId, ServiceClass};

/// One aircraft rotation flying the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    /// Seats sold in the offering's cabin on each flight
    pub seats: u32,
    /// Flights per week
    pub weekly_frequency: u32,
}

/// An airline's cabin on a route: fare, product quality and capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffering {
    pub id: OfferingId,
    pub airline: AirlineId,
    /// Origin IATA code
    pub origin: String,
    /// Destination IATA code
    pub destination: String,
    pub service_class: ServiceClass,
    /// Round-trip fare in dollars
    pub fare: f64,
    /// In-flight service score, on the configured service-quality scale
    pub in_flight_service: f64,
    /// Legroom score in [0, 1]
    pub legroom: f64,
    pub rotations: Vec<Rotation>,
}

impl FlightOffering {
    /// Weekly flights across all rotations, saturating at `u32::MAX`
    pub fn frequency(&self) -> u32 {
        self.rotations
            .iter()
            .fold(0u32, |total, r| total.saturating_add(r.weekly_frequency))
    }

    /// Weekly seats across all rotations
    pub fn weekly_seats(&self) -> u64 {
        self.rotations
            .iter()
            .map(|r| u64::from(r.seats) * u64::from(r.weekly_frequency))
            .fold(0u64, u64::saturating_add)
    }

    /// Weekly seat capacity in dollars
    pub fn capacity_dollars(&self) -> f64 {
        self.weekly_seats() as f64 * self.fare
    }

    pub fn reputation_input(&self) -> RouteReputationInput {
        RouteReputationInput {
            airline: self.airline,
            fare: self.fare,
            frequency: self.frequency(),
            in_flight_service: self.in_flight_service,
            legroom: self.legroom,
        }
    }

    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }

    /// One capacity unit per rotation, weighted by `reputation`
    pub fn capacity_units(&self, reputation: f64) -> impl Iterator<Item = CapacityUnit> + '_ {
        self.rotations.iter().enumerate().map(move |(index, rotation)| CapacityUnit {
            id: UnitId {
                offering: self.id,
                rotation: index as u32,
            },
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            ceiling: f64::from(rotation.seats) * f64::from(rotation.weekly_frequency) * self.fare.max(0.0),
            reputation,
        })
    }
}
