//! Periodic refresh of generated code and debug images

use crate::coordinator::RequestCoordinator;
use crate::tasks::Selection;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawns the refresh loop for a selection
pub struct ArtifactRefresher;

impl ArtifactRefresher {
    /// Refresh artifacts for `selection` every `period` until the handle is stopped or dropped
    ///
    /// The first refresh happens one period after spawning; the selection's
    /// defaults are expected to have been loaded already.
    pub fn spawn(coordinator: Arc<RequestCoordinator>, selection: Selection, period: Duration) -> RefreshHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::trace!(task = ?selection.task, config = ?selection.config, "refreshing artifacts");
                coordinator.refresh_artifacts(&selection, Some(cache_bust())).await;
            }
        });
        RefreshHandle { task }
    }
}

/// Owner of a running refresh loop
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Milliseconds since the epoch
fn cache_bust() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
