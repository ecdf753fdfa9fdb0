//! Read-only reference data registry
//!
//! Holds every market and airport plus the rival and island-exception
//! tables. Demand models take a `&ReferenceData` instead of querying
//! global lookup tables.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use super::{Airport, Market};
use crate::core::error::{Result, SimError};
use crate::core::types::{AirportId, MarketId};

/// Two country groups between which no travel demand exists.
///
/// Names are stored alphabetized so lookups are order-free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RivalPair {
    first: String,
    second: String,
}

impl RivalPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(SimError::InvalidRivalPair(format!("{a} cannot be its own rival")));
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

/// Market pair for which the island demand curve is not used
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IslandException {
    first: String,
    second: String,
}

impl IslandException {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self { first, second }
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

/// Validated, immutable set of markets and airports
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    // BTreeMaps keep iteration order fixed, so sums over markets are
    // bit-identical from run to run.
    markets: BTreeMap<MarketId, Market>,
    airports: BTreeMap<AirportId, Airport>,
    market_airports: BTreeMap<MarketId, Vec<AirportId>>,
    iata_index: AHashMap<String, AirportId>,
    rivals: AHashSet<RivalPair>,
    island_exceptions: AHashSet<IslandException>,
}

impl ReferenceData {
    pub fn builder() -> ReferenceDataBuilder {
        ReferenceDataBuilder::default()
    }

    pub fn market(&self, id: MarketId) -> Result<&Market> {
        self.markets.get(&id).ok_or(SimError::UnknownMarket(id))
    }

    pub fn airport(&self, id: AirportId) -> Result<&Airport> {
        self.airports.get(&id).ok_or(SimError::UnknownAirport(id))
    }

    pub fn airport_by_iata(&self, code: &str) -> Result<&Airport> {
        self.iata_index
            .get(code)
            .and_then(|id| self.airports.get(id))
            .ok_or_else(|| SimError::UnknownAirportCode(code.to_string()))
    }

    /// Market that owns the airport
    pub fn market_of(&self, airport: &Airport) -> Result<&Market> {
        self.market(airport.market)
    }

    /// Airports of a market, in id order
    pub fn airports_in(&self, market: MarketId) -> impl Iterator<Item = &Airport> + '_ {
        self.market_airports
            .get(&market)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.airports.get(id))
    }

    pub fn markets(&self) -> impl Iterator<Item = &Market> + '_ {
        self.markets.values()
    }

    pub fn airports(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.airports.values()
    }

    pub fn are_rivals(&self, group_a: &str, group_b: &str) -> bool {
        if group_a == group_b {
            return false;
        }
        RivalPair::new(group_a, group_b)
            .map(|pair| self.rivals.contains(&pair))
            .unwrap_or(false)
    }

    pub fn is_island_exception(&self, market_a: &str, market_b: &str) -> bool {
        self.island_exceptions
            .contains(&IslandException::new(market_a, market_b))
    }

    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }
}

/// Collects reference data and validates it on `build`
#[derive(Debug, Default)]
pub struct ReferenceDataBuilder {
    markets: Vec<Market>,
    airports: Vec<Airport>,
    rivals: Vec<(String, String)>,
    island_exceptions: Vec<(String, String)>,
}

impl ReferenceDataBuilder {
    pub fn market(mut self, market: Market) -> Self {
        self.markets.push(market);
        self
    }

    pub fn airport(mut self, airport: Airport) -> Self {
        self.airports.push(airport);
        self
    }

    pub fn rivals(mut self, group_a: impl Into<String>, group_b: impl Into<String>) -> Self {
        self.rivals.push((group_a.into(), group_b.into()));
        self
    }

    pub fn island_exception(mut self, market_a: impl Into<String>, market_b: impl Into<String>) -> Self {
        self.island_exceptions.push((market_a.into(), market_b.into()));
        self
    }

    pub fn build(self) -> Result<ReferenceData> {
        let mut data = ReferenceData::default();

        for mut market in self.markets {
            if data.markets.contains_key(&market.id) {
                return Err(SimError::DuplicateMarket(market.id));
            }
            for (name, series) in [("population", &mut market.population), ("tourist", &mut market.tourists)] {
                if series.is_empty() {
                    return Err(SimError::EmptySeries {
                        market: market.id,
                        series: name,
                    });
                }
                series.sort_by_key(|s| s.year);
                if let Some(pair) = series.windows(2).find(|w| w[0].year == w[1].year) {
                    return Err(SimError::DuplicateSample {
                        market: market.id,
                        year: pair[0].year,
                    });
                }
            }
            data.market_airports.entry(market.id).or_default();
            data.markets.insert(market.id, market);
        }

        for airport in self.airports {
            if !data.markets.contains_key(&airport.market) {
                return Err(SimError::UnknownMarket(airport.market));
            }
            if data.airports.contains_key(&airport.id) {
                return Err(SimError::DuplicateAirport(airport.id));
            }
            if data.iata_index.contains_key(&airport.iata) {
                return Err(SimError::DuplicateAirportCode(airport.iata));
            }
            data.iata_index.insert(airport.iata.clone(), airport.id);
            data.market_airports
                .entry(airport.market)
                .or_default()
                .push(airport.id);
            data.airports.insert(airport.id, airport);
        }

        for ids in data.market_airports.values_mut() {
            ids.sort();
        }

        for (a, b) in self.rivals {
            data.rivals.insert(RivalPair::new(a, b)?);
        }

        for (a, b) in self.island_exceptions {
            data.island_exceptions.insert(IslandException::new(a, b));
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GeoPoint;
    use crate::market::TimeSeriesSample;

    fn market(id: u32, name: &str) -> Market {
        Market {
            id: MarketId(id),
            name: name.into(),
            location: GeoPoint::default(),
            income: 1.0,
            is_island: false,
            is_national_capital: false,
            country: "X".into(),
            country_group: "G".into(),
            shared_catchment: 100.0,
            population: vec![TimeSeriesSample::new(2001, 2.0), TimeSeriesSample::new(2000, 1.0)],
            tourists: vec![TimeSeriesSample::new(2000, 10.0)],
        }
    }

    fn airport(id: u32, iata: &str, market: u32) -> Airport {
        Airport {
            id: AirportId(id),
            iata: iata.into(),
            name: String::new(),
            location: GeoPoint::default(),
            market: MarketId(market),
            exclusive_catchment: 0.0,
        }
    }

    #[test]
    fn test_rival_pair_alphabetized() {
        let pair = RivalPair::new("Zeta", "Alpha").unwrap();
        assert_eq!(pair.names(), ("Alpha", "Zeta"));
        assert_eq!(pair, RivalPair::new("Alpha", "Zeta").unwrap());
    }

    #[test]
    fn test_rival_pair_rejects_self() {
        assert!(matches!(
            RivalPair::new("Alpha", "Alpha"),
            Err(SimError::InvalidRivalPair(_))
        ));
    }

    #[test]
    fn test_rival_lookup_is_unordered() {
        let data = ReferenceData::builder().rivals("North", "South").build().unwrap();
        assert!(data.are_rivals("South", "North"));
        assert!(data.are_rivals("North", "South"));
        assert!(!data.are_rivals("North", "North"));
        assert!(!data.are_rivals("North", "East"));
    }

    #[test]
    fn test_island_exception_lookup() {
        let data = ReferenceData::builder()
            .island_exception("Honolulu", "Kahului")
            .build()
            .unwrap();
        assert!(data.is_island_exception("Kahului", "Honolulu"));
        assert!(!data.is_island_exception("Kahului", "Lihue"));
    }

    #[test]
    fn test_airports_indexed_by_market_and_code() {
        let data = ReferenceData::builder()
            .market(market(1, "A"))
            .market(market(2, "B"))
            .airport(airport(20, "BBB", 2))
            .airport(airport(11, "AA2", 1))
            .airport(airport(10, "AA1", 1))
            .build()
            .unwrap();

        let ids: Vec<_> = data.airports_in(MarketId(1)).map(|a| a.id).collect();
        assert_eq!(ids, vec![AirportId(10), AirportId(11)]);
        assert_eq!(data.airport_by_iata("BBB").unwrap().id, AirportId(20));
        assert!(matches!(
            data.airport_by_iata("ZZZ"),
            Err(SimError::UnknownAirportCode(_))
        ));
    }

    #[test]
    fn test_samples_sorted_on_build() {
        let data = ReferenceData::builder().market(market(1, "A")).build().unwrap();
        let years: Vec<_> = data.market(MarketId(1)).unwrap().population.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2000, 2001]);
    }

    #[test]
    fn test_duplicate_sample_rejected() {
        let mut m = market(1, "A");
        m.population.push(TimeSeriesSample::new(2000, 5.0));
        let result = ReferenceData::builder().market(m).build();
        assert!(matches!(result, Err(SimError::DuplicateSample { year: 2000, .. })));
    }

    #[test]
    fn test_empty_series_rejected() {
        let mut m = market(1, "A");
        m.tourists.clear();
        let result = ReferenceData::builder().market(market(2, "B")).market(m).build();
        assert!(matches!(
            result,
            Err(SimError::EmptySeries {
                market: MarketId(1),
                series: "tourist"
            })
        ));

        let mut m = market(1, "A");
        m.population.clear();
        let result = ReferenceData::builder().market(m).build();
        assert!(matches!(result, Err(SimError::EmptySeries { series: "population", .. })));
    }

    #[test]
    fn test_duplicate_market_rejected() {
        let result = ReferenceData::builder().market(market(1, "A")).market(market(1, "B")).build();
        assert!(matches!(result, Err(SimError::DuplicateMarket(MarketId(1)))));
    }

    #[test]
    fn test_duplicate_airport_rejected() {
        let result = ReferenceData::builder()
            .market(market(1, "A"))
            .airport(airport(10, "AA1", 1))
            .airport(airport(10, "AA2", 1))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateAirport(AirportId(10)))));

        let result = ReferenceData::builder()
            .market(market(1, "A"))
            .market(market(2, "B"))
            .airport(airport(10, "AAA", 1))
            .airport(airport(20, "AAA", 2))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateAirportCode(ref code)) if code == "AAA"));
    }

    #[test]
    fn test_airport_with_unknown_market_rejected() {
        let result = ReferenceData::builder().airport(airport(1, "AAA", 9)).build();
        assert!(matches!(result, Err(SimError::UnknownMarket(MarketId(9)))));
    }
}
