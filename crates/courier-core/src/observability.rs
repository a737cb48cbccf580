//! Status views and the periodic status monitor.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::TaskStatus;
use crate::ports::TaskRegistry;

/// Number of tasks currently in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Every task ever inserted is in exactly one status.
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }

    pub(crate) fn increment(&mut self, status: TaskStatus) {
        *self.slot(status) += 1;
    }

    /// Saturates at zero; a well-behaved registry never decrements an empty slot.
    pub(crate) fn decrement(&mut self, status: TaskStatus) {
        let slot = self.slot(status);
        debug_assert!(*slot > 0, "decrementing empty {status} count");
        *slot = slot.saturating_sub(1);
    }

    fn slot(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }

    /// Recompute from a list of statuses. Used to check the incremental
    /// aggregate against the tasks it describes.
    pub fn tally<I: IntoIterator<Item = TaskStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.increment(status);
        }
        counts
    }
}

/// Submission summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub submitted: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl From<StatusCounts> for Stats {
    fn from(counts: StatusCounts) -> Self {
        Self {
            submitted: counts.total(),
            in_progress: counts.in_progress,
            completed: counts.completed,
        }
    }
}

/// Logs the registry's aggregate counts at a fixed interval.
pub struct StatusMonitor {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl StatusMonitor {
    pub fn spawn(registry: Arc<dyn TaskRegistry>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let counts = registry.counts().await;
                        tracing::info!(
                            pending = counts.pending,
                            in_progress = counts.in_progress,
                            completed = counts.completed,
                            "task status"
                        );
                    }
                }
            }
        });

        Self { shutdown_tx, join }
    }

    /// Stop ticking and wait for the monitor task to exit.
    pub async fn stop(self) {
        // ignore send error: the task may already be gone
        let _ = self.shutdown_tx.send(true);
        let _ = self.join.await;
    }
}
