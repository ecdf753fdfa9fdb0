//! Route reputation scoring
//!
//! How attractive an offering is next to its competitors on the same
//! route and cabin. Fare, frequency and legroom carry 30% each and
//! in-flight service 10%; every sub-score lives on the same [1, 4] scale
//! as the result.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::ReputationConfig;
use crate::core::types::AirlineId;

pub const MIN_REPUTATION: f64 = 1.0;
pub const MAX_REPUTATION: f64 = 4.0;

const FARE_WEIGHT: f64 = 0.3;
const FREQUENCY_WEIGHT: f64 = 0.3;
const SERVICE_WEIGHT: f64 = 0.1;
const LEGROOM_WEIGHT: f64 = 0.3;

/// What the reputation model needs to know about one offering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteReputationInput {
    pub airline: AirlineId,
    pub fare: f64,
    /// Weekly flights of this offering
    pub frequency: u32,
    pub in_flight_service: f64,
    /// Legroom in [0, 1]
    pub legroom: f64,
}

/// Sub-scores and the weighted total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReputationScore {
    pub fare: f64,
    pub frequency: f64,
    pub service: f64,
    pub legroom: f64,
    pub total: f64,
}

/// Facts about the whole competing set
#[derive(Debug, Clone, Default)]
pub struct CompetitiveField {
    max_fare: f64,
    airline_frequency: AHashMap<AirlineId, u32>,
}

impl CompetitiveField {
    pub fn new(offerings: &[RouteReputationInput]) -> Self {
        let max_fare = offerings
            .iter()
            .map(|o| OrderedFloat(o.fare))
            .max()
            .map(|f| f.0)
            .unwrap_or(0.0);

        let mut airline_frequency = AHashMap::new();
        for offering in offerings {
            let total = airline_frequency.entry(offering.airline).or_insert(0u32);
            *total = total.saturating_add(offering.frequency);
        }

        Self {
            max_fare,
            airline_frequency,
        }
    }

    pub fn max_fare(&self) -> f64 {
        self.max_fare
    }

    /// Weekly flights of every offering the airline has in the set
    pub fn airline_frequency(&self, airline: AirlineId) -> u32 {
        self.airline_frequency.get(&airline).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteReputationModel {
    config: ReputationConfig,
}

impl RouteReputationModel {
    pub fn new(config: ReputationConfig) -> Self {
        Self { config }
    }

    /// Score one offering against the field it competes in
    pub fn score(&self, offering: &RouteReputationInput, field: &CompetitiveField) -> ReputationScore {
        let max_fare = field.max_fare().max(offering.fare);
        let fare_ratio = if max_fare > 0.0 {
            (offering.fare.max(0.0) / max_fare).powi(2)
        } else {
            0.0
        };
        let fare = rescale(1.0 - fare_ratio, 0.0, 1.0);

        let airline_frequency = field.airline_frequency(offering.airline).max(offering.frequency);
        let frequency = rescale(
            f64::from(airline_frequency).min(self.config.max_weekly_frequency),
            1.0,
            self.config.max_weekly_frequency,
        );

        let service = rescale(
            offering.in_flight_service,
            self.config.min_service_quality,
            self.config.max_service_quality,
        );

        let legroom = rescale(offering.legroom, 0.0, 1.0);

        let total = FARE_WEIGHT * fare
            + FREQUENCY_WEIGHT * frequency
            + SERVICE_WEIGHT * service
            + LEGROOM_WEIGHT * legroom;

        ReputationScore {
            fare,
            frequency,
            service,
            legroom,
            total: total.clamp(MIN_REPUTATION, MAX_REPUTATION),
        }
    }

    /// Reputation of one offering among `competitors` (which should include it)
    pub fn reputation(&self, offering: &RouteReputationInput, competitors: &[RouteReputationInput]) -> f64 {
        self.score(offering, &CompetitiveField::new(competitors)).total
    }

    /// Reputation of every offering in a competing set, in input order
    pub fn reputations(&self, offerings: &[RouteReputationInput]) -> Vec<f64> {
        let field = CompetitiveField::new(offerings);
        offerings.iter().map(|o| self.score(o, &field).total).collect()
    }
}

/// Linear map from [from_min, from_max] onto [MIN_REPUTATION, MAX_REPUTATION], clamped
fn rescale(value: f64, from_min: f64, from_max: f64) -> f64 {
    if from_max <= from_min {
        return MIN_REPUTATION;
    }
    let t = ((value - from_min) / (from_max - from_min)).clamp(0.0, 1.0);
    MIN_REPUTATION + t * (MAX_REPUTATION - MIN_REPUTATION)
}
