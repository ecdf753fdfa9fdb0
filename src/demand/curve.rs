//! Distance-decay demand curves
//!
//! Relative demand climbs from zero on short hops (where people drive
//! instead), holds at a plateau of 100, then falls off as 1/distance on
//! long hauls. Island origins have no surface alternative, so their
//! short-haul demand sits above the plateau instead of below it.

use serde::{Deserialize, Serialize};

use crate::core::config::{CurveConfig, CurveParams, PEAK_RELATIVE_DEMAND};

/// Curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    Business,
    Leisure,
}

/// A curve family with its parameters resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandCurve {
    pub kind: CurveKind,
    pub params: CurveParams,
}

impl DemandCurve {
    pub fn new(kind: CurveKind, curves: &CurveConfig) -> Self {
        let params = match kind {
            CurveKind::Business => curves.business,
            CurveKind::Leisure => curves.leisure,
        };
        Self { kind, params }
    }

    /// Mainland relative demand at `distance` miles
    pub fn relative_demand(&self, distance: f64) -> f64 {
        let p = &self.params;
        if distance <= 0.0 {
            return 0.0;
        }
        if distance < p.short_threshold {
            p.short_constant * distance.powf(p.short_exponent) * p.short_significance
        } else if distance <= p.long_threshold {
            PEAK_RELATIVE_DEMAND
        } else {
            long_haul_decay(p.long_threshold, distance)
        }
    }

    /// Island-origin relative demand at `distance` miles.
    ///
    /// Undefined at zero distance; callers skip co-located airports.
    pub fn relative_demand_island(&self, distance: f64) -> f64 {
        let p = &self.params;
        if distance < p.short_threshold {
            p.short_threshold * PEAK_RELATIVE_DEMAND / distance
        } else {
            self.relative_demand(distance)
        }
    }

    /// Picks the island or mainland variant
    pub fn evaluate(&self, distance: f64, island: bool) -> f64 {
        if island {
            self.relative_demand_island(distance)
        } else {
            self.relative_demand(distance)
        }
    }
}

fn long_haul_decay(long_threshold: f64, distance: f64) -> f64 {
    long_threshold * PEAK_RELATIVE_DEMAND / distance
}
