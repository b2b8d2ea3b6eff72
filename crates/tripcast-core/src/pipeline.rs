//! Stage abstraction and sequential pipeline runner
//!
//! Every stage spawns its units of work in `start` and holds a full
//! join barrier in `join`. The runner never starts stage N+1 before
//! stage N's last unit has finished.

use tracing::info;

/// A pipeline stage owning a set of concurrent units of work
#[async_trait::async_trait]
pub trait Stage: Send {
    /// Stage name used in log context
    fn name(&self) -> &'static str;

    /// Spawn every unit of work without blocking
    fn start(&mut self);

    /// Block until every spawned unit has finished, whatever its outcome
    async fn join(&mut self);
}

/// Run a single stage to completion
pub async fn run_stage(stage: &mut dyn Stage) {
    info!(stage = stage.name(), "stage starting");
    stage.start();
    stage.join().await;
    info!(stage = stage.name(), "stage complete");
}

/// Run stages strictly in sequence, each behind the previous barrier
pub async fn run_pipeline(stages: &mut [Box<dyn Stage>]) {
    for stage in stages {
        run_stage(stage.as_mut()).await;
    }
}
