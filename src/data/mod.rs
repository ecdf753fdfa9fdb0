//! Scenario and configuration files

pub mod loader;

pub use loader::{load_config, load_scenario, Scenario};
