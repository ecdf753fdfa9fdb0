//! Simulation configuration with documented constants
//!
//! All demand and allocation tuning numbers are collected here with
//! explanations of their purpose and how they interact with each other.
//! Every field has a default, so a TOML file only needs to name the
//! values it overrides.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::DemandSegment;

/// Peak value of every demand curve (the plateau between thresholds)
pub const PEAK_RELATIVE_DEMAND: f64 = 100.0;

/// Shape constants for one distance-decay demand curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Exponent applied to distance on the short-haul ramp
    pub short_exponent: f64,
    /// Multiplier on the short-haul ramp
    pub short_constant: f64,
    /// Second multiplier on the short-haul ramp
    ///
    /// Kept separate from `short_constant` so the ramp can be weakened
    /// without re-deriving the constant.
    pub short_significance: f64,
    /// Below this distance (miles) demand ramps up from zero
    pub short_threshold: f64,
    /// Above this distance (miles) demand decays as 1/distance
    pub long_threshold: f64,
}

impl CurveParams {
    /// Value of the short-haul ramp at its own threshold.
    ///
    /// Must equal the plateau value for the curve to be continuous.
    pub fn ramp_at_threshold(&self) -> f64 {
        self.short_constant * self.short_threshold.powf(self.short_exponent) * self.short_significance
    }

    fn validate(&self, name: &str) -> std::result::Result<(), String> {
        if self.short_threshold <= 0.0 {
            return Err(format!("{name}: short_threshold must be positive"));
        }
        if self.short_threshold > self.long_threshold {
            return Err(format!(
                "{name}: short_threshold ({}) should be <= long_threshold ({})",
                self.short_threshold, self.long_threshold
            ));
        }
        let ramp = self.ramp_at_threshold();
        if (ramp - PEAK_RELATIVE_DEMAND).abs() > 1e-6 {
            return Err(format!(
                "{name}: short-haul ramp reaches {ramp:.6} at the threshold, expected {PEAK_RELATIVE_DEMAND}"
            ));
        }
        Ok(())
    }
}

/// Curve parameter sets for the two curve families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Business travel peaks early: a sqrt ramp over the first 100 miles,
    /// then full demand out to 2500 miles.
    pub business: CurveParams,
    /// Leisure travel ramps linearly over 250 miles and starts decaying
    /// sooner, at 1500 miles.
    pub leisure: CurveParams,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            business: CurveParams {
                short_exponent: 0.5,
                short_constant: 10.0,
                short_significance: 1.0,
                short_threshold: 100.0,
                long_threshold: 2500.0,
            },
            leisure: CurveParams {
                short_exponent: 1.0,
                short_constant: 0.8,
                short_significance: 0.5,
                short_threshold: 250.0,
                long_threshold: 1500.0,
            },
        }
    }
}

/// Demand fractions kept when a trip crosses a border
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderMultipliers {
    /// Different country, same country group
    pub same_group: f64,
    /// Different country group, mainland origin
    pub mainland_international: f64,
    /// Different country group, island origin
    pub island_international: f64,
}

impl BorderMultipliers {
    fn validate(&self, name: &str) -> std::result::Result<(), String> {
        let all = [self.same_group, self.mainland_international, self.island_international];
        if all.iter().any(|m| !(0.0..=1.0).contains(m)) {
            return Err(format!("{name}: border multipliers must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Border multipliers for each demand model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Shared by the business and leisure resident models
    pub resident: BorderMultipliers,
    pub government: BorderMultipliers,
    pub tourist: BorderMultipliers,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            resident: BorderMultipliers {
                same_group: 3.0 / 4.0,
                mainland_international: 1.0 / 4.0,
                island_international: 1.0 / 12.0,
            },
            // Government and tourist travel make no island distinction
            government: BorderMultipliers {
                same_group: 33.0 / 100.0,
                mainland_international: 1.0 / 100.0,
                island_international: 1.0 / 100.0,
            },
            tourist: BorderMultipliers {
                same_group: 2.0 / 3.0,
                mainland_international: 1.0 / 3.0,
                island_international: 1.0 / 3.0,
            },
        }
    }
}

impl BorderConfig {
    pub fn for_segment(&self, segment: DemandSegment) -> &BorderMultipliers {
        match segment {
            DemandSegment::Business | DemandSegment::Leisure => &self.resident,
            DemandSegment::Government => &self.government,
            DemandSegment::Tourist => &self.tourist,
        }
    }
}

/// Constants for splitting dollars across cabins by route length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassSplitConfig {
    /// Distance (miles) at which the business-cabin ratio stops growing
    pub business_cap_distance: f64,
    /// Business-cabin ratio at the cap for business travelers
    pub business_scale_business_travelers: f64,
    /// Business-cabin ratio at the cap for leisure travelers
    pub business_scale_leisure_travelers: f64,
    /// Distance (miles) at which the premium-economy ratio stops growing
    pub premium_cap_distance: f64,
    pub premium_scale_business_travelers: f64,
    pub premium_scale_leisure_travelers: f64,
}

impl Default for ClassSplitConfig {
    fn default() -> Self {
        Self {
            business_cap_distance: 4000.0,
            business_scale_business_travelers: 2.0,
            business_scale_leisure_travelers: 0.5,
            premium_cap_distance: 1625.0,
            premium_scale_business_travelers: 0.75,
            premium_scale_leisure_travelers: 0.25,
        }
    }
}

/// Fraction of (population x per-capita income) each segment spends on air travel per year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingConfig {
    pub business: f64,
    pub government: f64,
    pub leisure: f64,
    pub tourist: f64,
}

impl Default for SpendingConfig {
    fn default() -> Self {
        Self {
            business: 0.02,
            government: 0.005,
            leisure: 0.03,
            tourist: 0.01,
        }
    }
}

impl SpendingConfig {
    pub fn share(&self, segment: DemandSegment) -> f64 {
        match segment {
            DemandSegment::Business => self.business,
            DemandSegment::Government => self.government,
            DemandSegment::Leisure => self.leisure,
            DemandSegment::Tourist => self.tourist,
        }
    }
}

/// Bounds used when scoring a flight offering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    pub min_service_quality: f64,
    pub max_service_quality: f64,
    /// Weekly frequencies beyond this count earn no extra score
    pub max_weekly_frequency: f64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            min_service_quality: 0.0,
            max_service_quality: 100.0,
            max_weekly_frequency: 245.0,
        }
    }
}

/// Revenue allocator limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Pass limit, as a multiple of (units + pools + 1)
    ///
    /// Every pass saturates a unit or exhausts a pool, so a factor of 1
    /// is already enough. The extra headroom only matters if floating
    /// point rounding leaves a pool a fraction of a cent short.
    pub max_iterations_factor: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_iterations_factor: 4,
        }
    }
}

/// Configuration for the demand and revenue systems
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub curves: CurveConfig,
    pub borders: BorderConfig,
    pub class_split: ClassSplitConfig,
    pub spending: SpendingConfig,
    pub reputation: ReputationConfig,
    pub allocator: AllocatorConfig,
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(SimError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.curves.business.validate("curves.business")?;
        self.curves.leisure.validate("curves.leisure")?;

        self.borders.resident.validate("borders.resident")?;
        self.borders.government.validate("borders.government")?;
        self.borders.tourist.validate("borders.tourist")?;

        let split = &self.class_split;
        if split.business_cap_distance <= 0.0 || split.premium_cap_distance <= 0.0 {
            return Err("class_split cap distances must be positive".into());
        }

        if self.reputation.min_service_quality >= self.reputation.max_service_quality {
            return Err(format!(
                "reputation.min_service_quality ({}) should be < max_service_quality ({})",
                self.reputation.min_service_quality, self.reputation.max_service_quality
            ));
        }
        if self.reputation.max_weekly_frequency <= 1.0 {
            return Err("reputation.max_weekly_frequency must be greater than 1".into());
        }

        if self.allocator.max_iterations_factor == 0 {
            return Err("allocator.max_iterations_factor must be at least 1".into());
        }

        Ok(())
    }
}

static INSTALLED: OnceLock<SimulationConfig> = OnceLock::new();

/// Process-wide config; the defaults until `set_config` installs another
pub fn config() -> &'static SimulationConfig {
    INSTALLED.get_or_init(SimulationConfig::default)
}

/// Validate and install the process-wide config.
///
/// Only the first install wins; any later call, or a call after `config()`
/// already fell back to the defaults, is rejected.
pub fn set_config(config: SimulationConfig) -> Result<&'static SimulationConfig> {
    config.validate().map_err(SimError::InvalidConfig)?;
    INSTALLED
        .set(config)
        .map_err(|_| SimError::InvalidConfig("a simulation config is already installed".into()))?;
    Ok(self::config())
}
