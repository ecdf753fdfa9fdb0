//! Travel demand between airports and markets
//!
//! Demand numbers here are relative weights, not passenger counts. They
//! only become dollars once the revenue layer divides them by the total
//! demand leaving a market.

pub mod aggregate;
pub mod class_split;
pub mod curve;
pub mod segment;

use crate::core::config::SimulationConfig;
use crate::market::ReferenceData;

pub use aggregate::{CatchmentBreakdown, Endpoint, MarketAggregator};
pub use class_split::{CabinShares, ClassSplit};
pub use curve::{CurveKind, DemandCurve};
pub use segment::{segment_demand, AirportPair, DemandOverrides, SegmentDemand, SegmentModel, SegmentModels};

/// Read-only inputs shared by every demand calculation.
///
/// The segment models are derived from `config` here, so every number a
/// calculation uses comes from the one config the context carries.
#[derive(Debug, Clone, Copy)]
pub struct DemandContext<'a> {
    pub reference: &'a ReferenceData,
    pub config: &'a SimulationConfig,
    models: SegmentModels,
}

impl<'a> DemandContext<'a> {
    pub fn new(reference: &'a ReferenceData, config: &'a SimulationConfig) -> Self {
        Self {
            reference,
            config,
            models: SegmentModels::new(config),
        }
    }

    /// Segment models built from this context's config
    pub fn models(&self) -> &SegmentModels {
        &self.models
    }
}
