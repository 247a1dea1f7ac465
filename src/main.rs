//! FitMeal
//!
//! An MCP server for food search, meal logging, and nutrient intake tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fitmeal::build_info;
use fitmeal::catalog::{FoodSearchCache, PublicNutritionClient};
use fitmeal::config::AppConfig;
use fitmeal::mcp::FitMealService;
use fitmeal::session::SessionState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fitmeal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = AppConfig::from_env()?;
    eprintln!("Catalog endpoint: {}", config.api_base_url);
    if config.service_key.is_empty() {
        tracing::warn!("FITMEAL_SERVICE_KEY is not set; catalog requests will be rejected");
    }

    let client = PublicNutritionClient::new(
        config.api_base_url.clone(),
        config.service_key.clone(),
        config.http_timeout,
    )?;
    let cache = Arc::new(FoodSearchCache::new(Arc::new(client)));
    let state = SessionState::with_daily_calories(config.daily_calories);

    // Create the FitMeal service
    let service = FitMealService::new(cache, state);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
