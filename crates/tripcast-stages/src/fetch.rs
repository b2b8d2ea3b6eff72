//! Fetch stage: one concurrent unit per configured city

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};
use tripcast_client::ForecastClient;
use tripcast_core::Stage;

use crate::paths::weather_path;
use crate::{drain_units, StageResult};

/// Fetches every configured city's raw forecast concurrently and
/// persists each to its own file under the data directory
pub struct FetchStage {
    client: Arc<dyn ForecastClient>,
    cities: Vec<(String, String)>,
    data_dir: PathBuf,
    handles: Vec<JoinHandle<()>>,
}

impl FetchStage {
    pub fn new(
        client: Arc<dyn ForecastClient>,
        cities: impl IntoIterator<Item = (String, String)>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            cities: cities.into_iter().collect(),
            data_dir: data_dir.into(),
            handles: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl Stage for FetchStage {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn start(&mut self) {
        for (city, location) in std::mem::take(&mut self.cities) {
            let client = Arc::clone(&self.client);
            let output = weather_path(&self.data_dir, &city);
            self.handles.push(tokio::spawn(async move {
                if let Err(e) = fetch_city(client.as_ref(), &city, &location, &output).await {
                    error!(%city, error = %e, "forecast fetch failed");
                }
            }));
        }
    }

    async fn join(&mut self) {
        drain_units("fetch", &mut self.handles).await;
    }
}

/// Fetch one city's forecast and persist it verbatim. An absent
/// forecast is a silent no-op: no file, no error.
pub async fn fetch_city(
    client: &dyn ForecastClient,
    city: &str,
    location: &str,
    output: &Path,
) -> StageResult<()> {
    info!(%city, "fetching forecast");

    let Some(raw) = client.fetch(location).await? else {
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, serde_json::to_vec_pretty(&raw)?).await?;

    info!(%city, output = %output.display(), "forecast saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tripcast_client::CannedForecastClient;
    use tripcast_core::run_stage;

    fn catalog(names: &[&str]) -> Vec<(String, String)> {
        names
            .iter()
            .map(|n| (n.to_uppercase(), n.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_failing_city_does_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let client = CannedForecastClient::new()
            .with_forecast("lisbon", json!({"forecasts": []}))
            .with_forecast("oslo", json!({"forecasts": []}))
            .with_failure("tunis");

        let mut stage = FetchStage::new(
            Arc::new(client),
            catalog(&["lisbon", "oslo", "tunis"]),
            dir.path(),
        );
        run_stage(&mut stage).await;

        assert!(dir.path().join("LISBON_weather.json").exists());
        assert!(dir.path().join("OSLO_weather.json").exists());
        assert!(!dir.path().join("TUNIS_weather.json").exists());
    }

    #[tokio::test]
    async fn test_absent_forecast_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let client = CannedForecastClient::new();

        let mut stage = FetchStage::new(Arc::new(client), catalog(&["lisbon"]), dir.path());
        run_stage(&mut stage).await;

        assert!(!dir.path().join("LISBON_weather.json").exists());
    }

    #[tokio::test]
    async fn test_raw_document_persisted_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let doc = json!({"forecasts": [{"date": "2024-06-01", "hours": []}]});
        let client = CannedForecastClient::new().with_forecast("lisbon", doc.clone());

        let mut stage = FetchStage::new(Arc::new(client), catalog(&["lisbon"]), dir.path());
        run_stage(&mut stage).await;

        let written: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("LISBON_weather.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written, doc);
    }
}
