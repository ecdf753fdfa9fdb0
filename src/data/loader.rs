//! Load scenarios from JSON and tuning constants from TOML
//!
//! A scenario bundles the reference data (markets, airports, rival and
//! island-exception tables) with the offerings flying and the routes to
//! simulate.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::market::{Airport, Market, ReferenceData};
use crate::revenue::FlightOffering;
use crate::simulation::RouteRequest;

/// Everything needed for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub date: NaiveDate,
    pub markets: Vec<Market>,
    pub airports: Vec<Airport>,
    /// Country-group pairs that generate no traffic
    #[serde(default)]
    pub rivals: Vec<(String, String)>,
    /// Market-name pairs exempt from the island demand curve
    #[serde(default)]
    pub island_exceptions: Vec<(String, String)>,
    #[serde(default)]
    pub offerings: Vec<FlightOffering>,
    #[serde(default)]
    pub routes: Vec<RouteRequest>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validated reference data for the scenario's markets and airports
    pub fn reference_data(&self) -> Result<ReferenceData> {
        let mut builder = ReferenceData::builder();
        for market in &self.markets {
            builder = builder.market(market.clone());
        }
        for airport in &self.airports {
            builder = builder.airport(airport.clone());
        }
        for (a, b) in &self.rivals {
            builder = builder.rivals(a.clone(), b.clone());
        }
        for (a, b) in &self.island_exceptions {
            builder = builder.island_exception(a.clone(), b.clone());
        }
        builder.build()
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let scenario = Scenario::from_file(path)?;
    tracing::info!(
        "Loaded scenario {}: {} markets, {} airports, {} offerings, {} routes",
        path.display(),
        scenario.markets.len(),
        scenario.airports.len(),
        scenario.offerings.len(),
        scenario.routes.len()
    );
    Ok(scenario)
}

/// Read a TOML config; missing sections keep their defaults
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    SimulationConfig::from_toml_str(&content)
}
