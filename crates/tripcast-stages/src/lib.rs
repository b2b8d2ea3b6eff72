//! The four pipeline stages
//!
//! Fetch and aggregation run as lightweight async units; analysis and
//! selection run on blocking worker threads so CPU-bound statistics can
//! occupy separate cores. Every stage spawns its units in `start` and
//! joins all of them in `join`; a failed unit never aborts its
//! siblings.

pub mod aggregate;
pub mod analysis;
pub mod fetch;
pub mod paths;
pub mod select;

pub use aggregate::*;
pub use analysis::*;
pub use fetch::*;
pub use paths::*;
pub use select::*;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::error;
use tripcast_client::ClientError;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("transport error: {0}")]
    Transport(#[from] ClientError),

    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Await every unit handle. A panicked unit is logged, never
/// propagated, so the stage barrier always completes.
pub(crate) async fn drain_units(stage: &'static str, handles: &mut Vec<JoinHandle<()>>) {
    for handle in handles.drain(..) {
        if let Err(e) = handle.await {
            error!(stage, error = %e, "unit aborted");
        }
    }
}
