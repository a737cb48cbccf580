use std::sync::Arc;

use crate::domain::{Task, TaskId};
use crate::error::CourierError;
use crate::observability::{Stats, StatusCounts, StatusMonitor};
use crate::ports::{IdGenerator, TaskRegistry};
use crate::worker::WorkerPool;

/// Create/read surface over a running worker pool.
///
/// Built by [`super::DispatcherBuilder`]. `shutdown()` must be awaited before
/// the dispatcher is dropped; dropping it early detaches the workers.
pub struct Dispatcher {
    pub(super) registry: Arc<dyn TaskRegistry>,
    pub(super) pool: WorkerPool,
    pub(super) id_generator: Arc<dyn IdGenerator>,
    pub(super) monitor: Option<StatusMonitor>,
}

impl Dispatcher {
    /// Allocate an id, record the task as pending, and queue it.
    ///
    /// Waits while the queue is full.
    pub async fn submit(&self, payload: serde_json::Value) -> Result<TaskId, CourierError> {
        let id = self.id_generator.generate_task_id();
        let task = Task::new(id, payload);
        let envelope = task.envelope();

        self.registry.insert(id, task).await?;
        self.pool.submit(envelope).await?;

        tracing::debug!(task_id = %id, "task submitted");
        Ok(id)
    }

    pub async fn get(&self, id: TaskId) -> Option<Task> {
        self.registry.get(id).await
    }

    pub async fn list(&self) -> Vec<Task> {
        self.registry.get_all().await
    }

    pub async fn counts(&self) -> StatusCounts {
        self.registry.counts().await
    }

    pub async fn stats(&self) -> Stats {
        self.registry.counts().await.into()
    }

    pub fn registry(&self) -> &Arc<dyn TaskRegistry> {
        &self.registry
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Ordered shutdown: close the queue, wait for the workers to drain it,
    /// then stop the monitor. Returns the final counts.
    ///
    /// Callers must stop submitting before calling this.
    pub async fn shutdown(self) -> StatusCounts {
        self.pool.stop().await;
        if let Some(monitor) = self.monitor {
            monitor.stop().await;
        }

        let counts = self.registry.counts().await;
        tracing::info!(
            pending = counts.pending,
            in_progress = counts.in_progress,
            completed = counts.completed,
            "dispatcher shut down"
        );
        counts
    }
}
