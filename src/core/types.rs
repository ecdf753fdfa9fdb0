//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for markets (metropolitan areas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarketId(pub u32);

/// Unique identifier for airports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AirportId(pub u32);

/// Unique identifier for airlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AirlineId(pub u32);

/// Unique identifier for a flight offering (one airline, route and cabin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OfferingId(pub u32);

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Traveler category with its own demand weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandSegment {
    Business,
    Leisure,
    Government,
    Tourist,
}

impl DemandSegment {
    pub const ALL: [DemandSegment; 4] = [
        DemandSegment::Business,
        DemandSegment::Leisure,
        DemandSegment::Government,
        DemandSegment::Tourist,
    ];
}

/// Cabin sold on a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    Business,
    PremiumEconomy,
    Economy,
}

impl ServiceClass {
    pub const ALL: [ServiceClass; 3] = [
        ServiceClass::Business,
        ServiceClass::PremiumEconomy,
        ServiceClass::Economy,
    ];
}

/// Dollar categories that are split across cabins.
///
/// Business travel blends the business and government segments,
/// leisure travel blends the leisure and tourist segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelerType {
    Business,
    Leisure,
}

impl TravelerType {
    /// The two demand segments whose dollars feed this traveler type
    pub fn segments(&self) -> (DemandSegment, DemandSegment) {
        match self {
            TravelerType::Business => (DemandSegment::Business, DemandSegment::Government),
            TravelerType::Leisure => (DemandSegment::Leisure, DemandSegment::Tourist),
        }
    }
}

/// Per-cabin dollar amounts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassDollars {
    pub business: f64,
    pub premium_economy: f64,
    pub economy: f64,
}

impl ClassDollars {
    pub fn get(&self, class: ServiceClass) -> f64 {
        match class {
            ServiceClass::Business => self.business,
            ServiceClass::PremiumEconomy => self.premium_economy,
            ServiceClass::Economy => self.economy,
        }
    }

    pub fn set(&mut self, class: ServiceClass, value: f64) {
        match class {
            ServiceClass::Business => self.business = value,
            ServiceClass::PremiumEconomy => self.premium_economy = value,
            ServiceClass::Economy => self.economy = value,
        }
    }

    pub fn total(&self) -> f64 {
        self.business + self.premium_economy + self.economy
    }
}

/// Days in a year divided by days in a week
pub const WEEKS_PER_YEAR: f64 = 365.25 / 7.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traveler_segments() {
        assert_eq!(
            TravelerType::Business.segments(),
            (DemandSegment::Business, DemandSegment::Government)
        );
        assert_eq!(
            TravelerType::Leisure.segments(),
            (DemandSegment::Leisure, DemandSegment::Tourist)
        );
    }

    #[test]
    fn test_class_dollars_lookup() {
        let dollars = ClassDollars {
            business: 1.0,
            premium_economy: 2.0,
            economy: 3.0,
        };
        assert_eq!(dollars.get(ServiceClass::PremiumEconomy), 2.0);
        assert_eq!(dollars.total(), 6.0);
    }

    #[test]
    fn test_ids_order() {
        // BTreeMap keys rely on this
        assert!(MarketId(1) < MarketId(2));
        assert!(AirportId(7) > AirportId(3));
    }

    #[test]
    fn test_segment_serde_names() {
        let json = serde_json::to_string(&ServiceClass::PremiumEconomy).unwrap();
        assert_eq!(json, "\"premium_economy\"");
    }
}
