use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use wanderwise::{GeminiClient, GoogleMapsClient, TripPlanner, VERSION, WanderWiseConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WanderWiseConfig::load().context("failed to load configuration")?;
    let _telemetry = telemetry::init(&config.logging)?;

    info!(version = VERSION, "starting WanderWise");

    let llm = GeminiClient::from_config(&config.llm)?;
    let maps = GoogleMapsClient::new(&config.google)?;
    let planner = TripPlanner::new(Arc::new(llm), Arc::new(maps), &config.defaults)?;

    web::run(&config.server, Arc::new(planner)).await
}
