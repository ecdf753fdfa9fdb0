//! Segment demand models
//!
//! Raw relative demand between two airports for one traveler segment.
//! Resident business and leisure travel each use their own curve;
//! government travel reuses the business curve and only leaves national
//! capitals; tourist travel reuses the leisure curve and is weighted by
//! the destination's tourist arrivals rather than its population.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::curve::{CurveKind, DemandCurve};
use super::DemandContext;
use crate::core::config::{BorderMultipliers, SimulationConfig};
use crate::core::error::Result;
use crate::core::types::DemandSegment;
use crate::market::{distance, Airport, Market};

/// Multiplier when exactly one end of the trip is an island
pub const ISLAND_MAINLAND_MULTIPLIER: f64 = 0.5;

/// Precomputed answers that skip the corresponding lookups
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DemandOverrides {
    /// Whether the two markets' country groups are rivals
    pub rivals: Option<bool>,
    /// Whether the market pair is exempt from the island curve
    pub island_exception: Option<bool>,
    /// Destination population (tourist arrivals for the tourist segment)
    pub destination_weight: Option<f64>,
}

/// Facts about an airport pair shared by every segment model
#[derive(Debug, Clone, Copy)]
pub struct AirportPair<'a> {
    pub origin: &'a Airport,
    pub destination: &'a Airport,
    pub origin_market: &'a Market,
    pub destination_market: &'a Market,
    /// Great-circle distance in miles
    pub distance: f64,
    pub rivals: bool,
    /// Origin is an island and the pair is not exempt
    pub island_curve: bool,
}

impl<'a> AirportPair<'a> {
    pub fn resolve(
        ctx: &DemandContext<'a>,
        origin: &'a Airport,
        destination: &'a Airport,
        overrides: &DemandOverrides,
    ) -> Result<Self> {
        let origin_market = ctx.reference.market_of(origin)?;
        let destination_market = ctx.reference.market_of(destination)?;

        let rivals = overrides.rivals.unwrap_or_else(|| {
            ctx.reference
                .are_rivals(&origin_market.country_group, &destination_market.country_group)
        });
        let exempt = overrides.island_exception.unwrap_or_else(|| {
            ctx.reference
                .is_island_exception(&origin_market.name, &destination_market.name)
        });

        Ok(Self {
            origin,
            destination,
            origin_market,
            destination_market,
            distance: distance::between(origin.location, destination.location),
            rivals,
            island_curve: origin_market.is_island && !exempt,
        })
    }

    /// Same market, rival groups, or co-located airports
    pub fn is_dead(&self) -> bool {
        self.origin_market.id == self.destination_market.id || self.rivals || self.distance <= 0.0
    }

    pub fn is_domestic(&self) -> bool {
        self.origin_market.same_country(self.destination_market)
    }

    /// Halves demand when exactly one side is an island.
    ///
    /// Applied the same way in both directions, while the island curve
    /// only looks at the origin.
    pub fn island_multiplier(&self) -> f64 {
        if self.origin_market.is_island != self.destination_market.is_island {
            ISLAND_MAINLAND_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn border_multiplier(&self, borders: &BorderMultipliers) -> f64 {
        if self.is_domestic() {
            1.0
        } else if self.origin_market.same_country_group(self.destination_market) {
            borders.same_group
        } else if self.origin_market.is_island {
            borders.island_international
        } else {
            borders.mainland_international
        }
    }
}

/// One segment's demand model with its curve and border constants resolved
#[derive(Debug, Clone, Copy)]
pub struct SegmentModel {
    pub segment: DemandSegment,
    pub curve: DemandCurve,
    pub borders: BorderMultipliers,
}

impl SegmentModel {
    pub fn new(segment: DemandSegment, config: &SimulationConfig) -> Self {
        let kind = match segment {
            DemandSegment::Business | DemandSegment::Government => CurveKind::Business,
            DemandSegment::Leisure | DemandSegment::Tourist => CurveKind::Leisure,
        };
        Self {
            segment,
            curve: DemandCurve::new(kind, &config.curves),
            borders: *config.borders.for_segment(segment),
        }
    }

    /// Raw demand for this segment over a resolved airport pair
    pub fn demand(&self, pair: &AirportPair<'_>, date: NaiveDate, overrides: &DemandOverrides) -> Result<f64> {
        if pair.is_dead() {
            return Ok(0.0);
        }
        if self.segment == DemandSegment::Government && !pair.origin_market.is_national_capital {
            return Ok(0.0);
        }

        let weight = match overrides.destination_weight {
            Some(weight) => weight,
            None if self.segment == DemandSegment::Tourist => pair.destination_market.tourists_at(date)?,
            None => pair.destination_market.population_at(date)?,
        };

        let relative = self.curve.evaluate(pair.distance, pair.island_curve);
        let demand = weight / 100.0
            * relative
            * pair.border_multiplier(&self.borders)
            * pair.island_multiplier();

        Ok(demand.max(0.0))
    }
}

/// Demand between one airport pair for every segment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentDemand {
    pub business: f64,
    pub leisure: f64,
    pub government: f64,
    pub tourist: f64,
}

impl SegmentDemand {
    pub fn get(&self, segment: DemandSegment) -> f64 {
        match segment {
            DemandSegment::Business => self.business,
            DemandSegment::Leisure => self.leisure,
            DemandSegment::Government => self.government,
            DemandSegment::Tourist => self.tourist,
        }
    }

    pub fn set(&mut self, segment: DemandSegment, value: f64) {
        match segment {
            DemandSegment::Business => self.business = value,
            DemandSegment::Leisure => self.leisure = value,
            DemandSegment::Government => self.government = value,
            DemandSegment::Tourist => self.tourist = value,
        }
    }

    /// Apply `f` to every segment value
    pub fn map(&self, mut f: impl FnMut(DemandSegment, f64) -> f64) -> Self {
        let mut out = Self::default();
        for segment in DemandSegment::ALL {
            out.set(segment, f(segment, self.get(segment)));
        }
        out
    }
}

/// All four segment models, built once per configuration
#[derive(Debug, Clone, Copy)]
pub struct SegmentModels {
    models: [SegmentModel; 4],
}

impl SegmentModels {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            models: DemandSegment::ALL.map(|segment| SegmentModel::new(segment, config)),
        }
    }

    pub fn model(&self, segment: DemandSegment) -> &SegmentModel {
        // ALL and models share the same order
        match segment {
            DemandSegment::Business => &self.models[0],
            DemandSegment::Leisure => &self.models[1],
            DemandSegment::Government => &self.models[2],
            DemandSegment::Tourist => &self.models[3],
        }
    }

    /// Demand for every segment, resolving the pair (and its distance) once
    pub fn pair_demand(
        &self,
        ctx: &DemandContext<'_>,
        origin: &Airport,
        destination: &Airport,
        date: NaiveDate,
    ) -> Result<SegmentDemand> {
        let overrides = DemandOverrides::default();
        let pair = AirportPair::resolve(ctx, origin, destination, &overrides)?;
        let mut demand = SegmentDemand::default();
        if pair.is_dead() {
            return Ok(demand);
        }
        for model in &self.models {
            demand.set(model.segment, model.demand(&pair, date, &overrides)?);
        }
        Ok(demand)
    }
}

/// Demand for a single segment between two airports
pub fn segment_demand(
    ctx: &DemandContext<'_>,
    segment: DemandSegment,
    origin: &Airport,
    destination: &Airport,
    date: NaiveDate,
    overrides: &DemandOverrides,
) -> Result<f64> {
    let pair = AirportPair::resolve(ctx, origin, destination, overrides)?;
    SegmentModel::new(segment, ctx.config).demand(&pair, date, overrides)
}
