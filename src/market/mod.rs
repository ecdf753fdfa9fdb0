//! Market reference data
//!
//! Markets are metropolitan areas with a population history and a set of
//! airports. Everything in this module is read-only during a simulation
//! pass, so one `ReferenceData` can be shared across threads.

pub mod distance;
pub mod growth;
pub mod reference;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{AirportId, GeoPoint, MarketId};

pub use reference::{IslandException, ReferenceData, ReferenceDataBuilder, RivalPair};

/// One yearly observation of a population or tourist-volume series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSample {
    pub year: i32,
    pub value: f64,
}

impl TimeSeriesSample {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// A metropolitan area that generates and attracts travel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    pub location: GeoPoint,
    /// Per-capita annual income in dollars
    pub income: f64,
    #[serde(default)]
    pub is_island: bool,
    #[serde(default)]
    pub is_national_capital: bool,
    pub country: String,
    pub country_group: String,
    /// Percentage (0-100) of the market reachable through any of its airports
    pub shared_catchment: f64,
    #[serde(default)]
    pub population: Vec<TimeSeriesSample>,
    #[serde(default)]
    pub tourists: Vec<TimeSeriesSample>,
}

impl Market {
    /// Resident population on the given date
    pub fn population_at(&self, date: NaiveDate) -> Result<f64> {
        growth::value_at(&self.population, date).ok_or(SimError::EmptySeries {
            market: self.id,
            series: "population",
        })
    }

    /// Yearly tourist arrivals on the given date
    pub fn tourists_at(&self, date: NaiveDate) -> Result<f64> {
        growth::value_at(&self.tourists, date).ok_or(SimError::EmptySeries {
            market: self.id,
            series: "tourist",
        })
    }

    pub fn same_country(&self, other: &Market) -> bool {
        self.country == other.country
    }

    pub fn same_country_group(&self, other: &Market) -> bool {
        self.country_group == other.country_group
    }
}

/// An airport serving exactly one market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: AirportId,
    /// Three-letter IATA code, used to scope revenue pools
    pub iata: String,
    #[serde(default)]
    pub name: String,
    pub location: GeoPoint,
    pub market: MarketId,
    /// Percentage (0-100) of the market reachable only through this airport
    #[serde(default)]
    pub exclusive_catchment: f64,
}

impl Airport {
    /// Share of its market's travel spending this airport can draw on.
    ///
    /// The shared catchment counts in full for every airport in the market,
    /// so these fractions sum to more than one in multi-airport markets.
    pub fn catchment_fraction(&self, market: &Market) -> f64 {
        ((market.shared_catchment + self.exclusive_catchment) / 100.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Market {
        Market {
            id: MarketId(1),
            name: "Springfield".into(),
            location: GeoPoint::new(39.8, -89.6),
            income: 40_000.0,
            is_island: false,
            is_national_capital: false,
            country: "US".into(),
            country_group: "North America".into(),
            shared_catchment: 40.0,
            population: vec![TimeSeriesSample::new(2000, 100.0)],
            tourists: vec![],
        }
    }

    #[test]
    fn test_population_lookup() {
        let date = NaiveDate::from_ymd_opt(2010, 3, 1).unwrap();
        assert_eq!(market().population_at(date).unwrap(), 100.0);
    }

    #[test]
    fn test_empty_tourist_series_is_error() {
        let date = NaiveDate::from_ymd_opt(2010, 3, 1).unwrap();
        let err = market().tourists_at(date).unwrap_err();
        assert!(matches!(err, SimError::EmptySeries { series: "tourist", .. }));
    }

    #[test]
    fn test_catchment_fraction_clamped() {
        let market = market();
        let mut airport = Airport {
            id: AirportId(1),
            iata: "SPI".into(),
            name: String::new(),
            location: market.location,
            market: market.id,
            exclusive_catchment: 10.0,
        };
        assert!((airport.catchment_fraction(&market) - 0.5).abs() < 1e-12);

        airport.exclusive_catchment = 90.0;
        assert_eq!(airport.catchment_fraction(&market), 1.0);
    }
}
