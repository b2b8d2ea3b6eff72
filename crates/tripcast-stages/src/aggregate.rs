//! Aggregation stage: merge per-city analyses into one dataset

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::{error, info};
use tripcast_core::Stage;

use crate::paths::{city_key, discover, ANALYSIS_SUFFIX};
use crate::{drain_units, StageError, StageResult};

/// Merges every analysis file into a single JSON object keyed by the
/// city name derived from the file name. Runs as exactly one unit:
/// unlike fetch and analysis, the first bad file aborts the whole
/// merge and no output is written.
pub struct AggregationStage {
    results_dir: PathBuf,
    output: PathBuf,
    handles: Vec<JoinHandle<()>>,
}

impl AggregationStage {
    pub fn new(results_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            output: output.into(),
            handles: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl Stage for AggregationStage {
    fn name(&self) -> &'static str {
        "aggregation"
    }

    fn start(&mut self) {
        let results_dir = self.results_dir.clone();
        let output = self.output.clone();
        self.handles.push(tokio::spawn(async move {
            match aggregate_analyses(&results_dir, &output).await {
                Ok(count) => {
                    info!(cities = count, output = %output.display(), "dataset aggregated");
                }
                Err(e) => error!(error = %e, "aggregation failed"),
            }
        }));
    }

    async fn join(&mut self) {
        drain_units("aggregation", &mut self.handles).await;
    }
}

/// Merge analysis files into one mapping, in sorted file-name order.
/// Files whose names derive the same city key overwrite earlier
/// entries; that is a property of the naming scheme, not an error.
pub async fn aggregate_analyses(results_dir: &Path, output: &Path) -> StageResult<usize> {
    info!(dir = %results_dir.display(), "aggregating analyses");

    let mut dataset = Map::new();
    for file in discover(results_dir, ANALYSIS_SUFFIX)? {
        let key = city_key(&file)
            .ok_or_else(|| {
                StageError::Validation(format!("underivable city key: {}", file.display()))
            })?
            .to_string();
        let value: Value = serde_json::from_str(&tokio::fs::read_to_string(&file).await?)?;
        dataset.insert(key, value);
    }

    let count = dataset.len();
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, serde_json::to_vec_pretty(&Value::Object(dataset))?).await?;

    Ok(count)
}
