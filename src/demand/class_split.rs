//! Splits traveler dollars across cabins by route length
//!
//! Premium cabins grow more attractive as flights get longer, up to a
//! cap distance per cabin. Economy always carries a ratio of 1, so the
//! normalizing sum is never zero.

use serde::{Deserialize, Serialize};

use crate::core::config::ClassSplitConfig;
use crate::core::types::{ServiceClass, TravelerType};

/// Fractions of one traveler type's dollars spent in each cabin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinShares {
    pub business: f64,
    pub premium_economy: f64,
    pub economy: f64,
}

impl CabinShares {
    pub fn get(&self, class: ServiceClass) -> f64 {
        match class {
            ServiceClass::Business => self.business,
            ServiceClass::PremiumEconomy => self.premium_economy,
            ServiceClass::Economy => self.economy,
        }
    }

    pub fn sum(&self) -> f64 {
        self.business + self.premium_economy + self.economy
    }
}

/// Cabin shares for both traveler types on one route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassSplit {
    pub business_travelers: CabinShares,
    pub leisure_travelers: CabinShares,
}

impl ClassSplit {
    /// Compute the six cabin percentages for a route of `distance` miles
    pub fn for_distance(distance: f64, config: &ClassSplitConfig) -> Self {
        Self {
            business_travelers: shares(distance, TravelerType::Business, config),
            leisure_travelers: shares(distance, TravelerType::Leisure, config),
        }
    }

    pub fn shares(&self, traveler: TravelerType) -> &CabinShares {
        match traveler {
            TravelerType::Business => &self.business_travelers,
            TravelerType::Leisure => &self.leisure_travelers,
        }
    }
}

fn shares(distance: f64, traveler: TravelerType, config: &ClassSplitConfig) -> CabinShares {
    let (business_scale, premium_scale) = match traveler {
        TravelerType::Business => (
            config.business_scale_business_travelers,
            config.premium_scale_business_travelers,
        ),
        TravelerType::Leisure => (
            config.business_scale_leisure_travelers,
            config.premium_scale_leisure_travelers,
        ),
    };

    let business = capped_ratio(distance, config.business_cap_distance) * business_scale;
    let premium = capped_ratio(distance, config.premium_cap_distance) * premium_scale;
    let economy = 1.0;
    let total = business + premium + economy;

    CabinShares {
        business: business / total,
        premium_economy: premium / total,
        economy: economy / total,
    }
}

/// Linear ramp from 0 at zero miles to 1 at `cap` miles and beyond
fn capped_ratio(distance: f64, cap: f64) -> f64 {
    (distance.max(0.0) / cap).min(1.0)
}
