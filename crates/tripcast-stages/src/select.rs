//! Selection stage: pick the most travel-favorable cities

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tripcast_core::{select_best, summarize_city, CityData, SelectionResult, Stage};

use crate::{drain_units, StageError, StageResult};

/// Reads the aggregated dataset and logs the winning city set. Runs as
/// a single unit on the blocking pool; nothing is returned downstream.
pub struct SelectionStage {
    input: PathBuf,
    handles: Vec<JoinHandle<()>>,
}

impl SelectionStage {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            handles: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl Stage for SelectionStage {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn start(&mut self) {
        let input = self.input.clone();
        self.handles.push(tokio::task::spawn_blocking(move || {
            match select_from_file(&input) {
                Ok(Some(result)) => info!(
                    cities = %result.cities.join(", "),
                    avg_temp = result.avg_temp,
                    cond_hours = result.cond_hours,
                    "most favorable cities for travel"
                ),
                Ok(None) => info!("no city qualified for selection"),
                Err(e) => error!(error = %e, "selection failed"),
            }
        }));
    }

    async fn join(&mut self) {
        drain_units("selection", &mut self.handles).await;
    }
}

/// Run selection over an aggregated dataset file.
///
/// A dataset failing schema validation ends the stage with `Ok(None)`:
/// it is logged here and treated as a normal no-output outcome rather
/// than surfaced as an error.
pub fn select_from_file(input: &Path) -> StageResult<Option<SelectionResult>> {
    let value: Value = serde_json::from_str(&fs::read_to_string(input)?)?;

    let cities = match decode_dataset(value) {
        Ok(cities) => cities,
        Err(e) => {
            error!(error = %e, "aggregated dataset failed validation");
            return Ok(None);
        }
    };

    let summaries = cities
        .iter()
        .map(|(name, data)| (name.as_str(), summarize_city(data)));
    Ok(select_best(summaries))
}

/// Validate the raw dataset into typed city data, preserving key order
fn decode_dataset(value: Value) -> StageResult<Vec<(String, CityData)>> {
    let Value::Object(entries) = value else {
        return Err(StageError::Validation("dataset is not an object".to_string()));
    };

    entries
        .into_iter()
        .map(|(city, days)| match serde_json::from_value::<CityData>(days) {
            Ok(data) => Ok((city, data)),
            Err(e) => Err(StageError::Validation(format!("city {city}: {e}"))),
        })
        .collect()
}
