use thiserror::Error;

use crate::core::types::{AirportId, MarketId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Market not found: {0:?}")]
    UnknownMarket(MarketId),

    #[error("Airport not found: {0:?}")]
    UnknownAirport(AirportId),

    #[error("No airport with IATA code {0}")]
    UnknownAirportCode(String),

    #[error("Market {market:?} has no {series} samples")]
    EmptySeries { market: MarketId, series: &'static str },

    #[error("Market {market:?} has more than one sample for year {year}")]
    DuplicateSample { market: MarketId, year: i32 },

    #[error("Market {0:?} is defined more than once")]
    DuplicateMarket(MarketId),

    #[error("Airport {0:?} is defined more than once")]
    DuplicateAirport(AirportId),

    #[error("IATA code {0} is used by more than one airport")]
    DuplicateAirportCode(String),

    #[error("Invalid rival pair: {0}")]
    InvalidRivalPair(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
