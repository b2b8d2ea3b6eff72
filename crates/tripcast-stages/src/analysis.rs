//! Analysis stage: CPU-parallel per-file day statistics

use std::fs;
use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tripcast_core::{analyze_forecast, ForecastPayload, Stage};

use crate::paths::{analysis_path, discover, WEATHER_SUFFIX};
use crate::{drain_units, StageResult};

/// Analyzes every fetched forecast file on the blocking worker pool,
/// one unit per file, writing per-city day summaries to the results
/// directory
pub struct AnalysisStage {
    data_dir: PathBuf,
    results_dir: PathBuf,
    handles: Vec<JoinHandle<()>>,
}

impl AnalysisStage {
    pub fn new(data_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            results_dir: results_dir.into(),
            handles: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl Stage for AnalysisStage {
    fn name(&self) -> &'static str {
        "analysis"
    }

    fn start(&mut self) {
        let inputs = match discover(&self.data_dir, WEATHER_SUFFIX) {
            Ok(inputs) => inputs,
            Err(e) => {
                error!(dir = %self.data_dir.display(), error = %e, "forecast discovery failed");
                return;
            }
        };

        for input in inputs {
            let Some(output) = analysis_path(&self.results_dir, &input) else {
                warn!(input = %input.display(), "skipping file with unexpected name");
                continue;
            };
            self.handles.push(tokio::task::spawn_blocking(move || {
                if let Err(e) = analyze_file(&input, &output) {
                    error!(input = %input.display(), error = %e, "analysis failed");
                }
            }));
        }
    }

    async fn join(&mut self) {
        drain_units("analysis", &mut self.handles).await;
    }
}

/// Analyze one raw forecast file into per-day summaries
pub fn analyze_file(input: &Path, output: &Path) -> StageResult<()> {
    info!(input = %input.display(), "analyzing forecast");

    let payload: ForecastPayload = serde_json::from_str(&fs::read_to_string(input)?)?;
    let city_data = analyze_forecast(&payload);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_vec_pretty(&city_data)?)?;

    info!(output = %output.display(), "analysis saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tripcast_core::{run_stage, CityData};

    fn write_forecast(dir: &Path, city: &str) {
        let doc = json!({
            "forecasts": [{
                "date": "2024-06-01",
                "hours": [
                    {"hour": "10", "temp": 20.0, "condition": "clear"},
                    {"hour": "11", "temp": 22.0, "condition": "rain"}
                ]
            }]
        });
        fs::write(
            dir.join(format!("{city}_weather.json")),
            serde_json::to_vec_pretty(&doc).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_analysis_writes_day_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");
        write_forecast(dir.path(), "LISBON");

        let mut stage = AnalysisStage::new(dir.path(), &results);
        run_stage(&mut stage).await;

        let city: CityData = serde_json::from_str(
            &fs::read_to_string(results.join("LISBON_analysis.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(city.days.len(), 1);
        assert_eq!(city.days[0].temp_avg, Some(21.0));
        assert_eq!(city.days[0].relevant_cond_hours, 1);
        assert_eq!(city.days[0].hours_count, 2);
    }

    #[tokio::test]
    async fn test_malformed_file_does_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");
        write_forecast(dir.path(), "LISBON");
        fs::write(dir.path().join("OSLO_weather.json"), "not json").unwrap();

        let mut stage = AnalysisStage::new(dir.path(), &results);
        run_stage(&mut stage).await;

        assert!(results.join("LISBON_analysis.json").exists());
        assert!(!results.join("OSLO_analysis.json").exists());
    }

    #[tokio::test]
    async fn test_missing_data_dir_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut stage = AnalysisStage::new(dir.path().join("missing"), dir.path().join("results"));
        run_stage(&mut stage).await;

        assert!(!dir.path().join("results").exists());
    }
}
