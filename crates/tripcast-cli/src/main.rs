//! tripcast - one-shot forecast batch pipeline
//!
//! This binary coordinates four stages, each run to completion before
//! the next begins:
//! - Per-city forecast fetching (HTTP client, one unit per city)
//! - CPU-parallel per-file day statistics
//! - Aggregation into one combined dataset
//! - Selection of the most travel-favorable cities

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use tripcast_client::{ForecastClient, HttpForecastClient};
use tripcast_config::AppConfig;
use tripcast_core::{run_pipeline, Stage};
use tripcast_stages::{AggregationStage, AnalysisStage, FetchStage, SelectionStage};

#[tokio::main]
async fn main() -> Result<()> {
    tripcast_obs::init("tripcast");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        cities = config.cities.len(),
        data_dir = %config.paths.data_dir.display(),
        results_dir = %config.paths.results_dir.display(),
        "loaded configuration"
    );

    let client: Arc<dyn ForecastClient> = Arc::new(
        HttpForecastClient::new(&config.api.base_url).context("Failed to build forecast client")?,
    );

    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(FetchStage::new(
            client,
            config.cities.clone(),
            &config.paths.data_dir,
        )),
        Box::new(AnalysisStage::new(
            &config.paths.data_dir,
            &config.paths.results_dir,
        )),
        Box::new(AggregationStage::new(
            &config.paths.results_dir,
            &config.paths.aggregated_file,
        )),
        Box::new(SelectionStage::new(&config.paths.aggregated_file)),
    ];
    run_pipeline(&mut stages).await;

    info!("pipeline finished");
    Ok(())
}
