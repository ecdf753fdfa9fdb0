//! Airline Demand - Entry Point
//!
//! Loads a scenario, simulates every route it lists and prints the weekly
//! revenue of each as JSON.

use std::path::PathBuf;

use airline_demand::core::config::{set_config, SimulationConfig};
use airline_demand::core::error::Result;
use airline_demand::data::{load_config, load_scenario};
use airline_demand::demand::DemandContext;
use airline_demand::simulation::{simulate_batch, RouteRequest, RouteRevenue};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Simulate one week of airline competition
#[derive(Parser, Debug)]
#[command(name = "airline-demand")]
#[command(about = "Estimate route demand and allocate revenue across competing flights")]
struct Args {
    /// Scenario JSON with markets, airports, offerings and routes
    #[arg(long)]
    scenario: PathBuf,

    /// TOML file overriding model constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation date (YYYY-MM-DD); defaults to the scenario's date
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// One line of output per requested route
#[derive(Serialize)]
struct RouteOutput {
    request: RouteRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    revenue: Option<RouteRevenue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("airline_demand=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = set_config(match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    })?;
    let scenario = load_scenario(&args.scenario)?;
    let reference = scenario.reference_data()?;
    let date = args.date.unwrap_or(scenario.date);

    let ctx = DemandContext::new(&reference, config);
    let results = simulate_batch(&ctx, &scenario.routes, date, &scenario.offerings);

    let output: Vec<RouteOutput> = scenario
        .routes
        .iter()
        .cloned()
        .zip(results)
        .map(|(request, result)| match result {
            Ok(revenue) => RouteOutput {
                request,
                revenue: Some(revenue),
                error: None,
            },
            Err(err) => {
                tracing::warn!("Route {} failed: {}", request.origin, err);
                RouteOutput {
                    request,
                    revenue: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    tracing::info!("Simulated {} routes for {}", output.len(), date);

    Ok(())
}
