use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{TaskEnvelope, TaskStatus};
use crate::error::CourierError;
use crate::ports::{TaskExecutor, TaskRegistry};
use crate::queue::BoundedQueue;

/// Upper bound on `worker_count`; each worker is one spawned task.
pub const MAX_WORKERS: usize = 4096;

/// Fixed-size pool of worker loops draining one queue into one registry.
///
/// - `submit()` enqueues (and waits while the queue is full)
/// - `stop()` closes the queue and waits until every worker has drained it
///
/// `stop` takes `self`, so the pool cannot be stopped twice or used after.
pub struct WorkerPool {
    queue: Arc<BoundedQueue>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `worker_count` workers. They start dequeuing immediately.
    pub fn start(
        registry: Arc<dyn TaskRegistry>,
        queue: Arc<BoundedQueue>,
        worker_count: usize,
        executor: Arc<dyn TaskExecutor>,
    ) -> Result<Self, CourierError> {
        if worker_count == 0 {
            return Err(CourierError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if worker_count > MAX_WORKERS {
            return Err(CourierError::InvalidConfig(format!(
                "worker count must be at most {MAX_WORKERS}"
            )));
        }

        let mut joins = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let registry = Arc::clone(&registry);
            let queue = Arc::clone(&queue);
            let executor = Arc::clone(&executor);

            joins.push(tokio::spawn(async move {
                worker_loop(worker_id, registry, queue, executor).await;
            }));
        }
        tracing::info!(
            workers = worker_count,
            capacity = queue.capacity(),
            "worker pool started"
        );

        Ok(Self { queue, joins })
    }

    pub fn worker_count(&self) -> usize {
        self.joins.len()
    }

    /// Hand a task to the workers. The caller must have inserted it into the
    /// registry first.
    pub async fn submit(&self, envelope: TaskEnvelope) -> Result<(), CourierError> {
        self.queue.enqueue(envelope).await
    }

    /// Close the queue and wait for every worker to finish what was queued.
    /// In-flight tasks are not interrupted.
    pub async fn stop(self) {
        self.queue.close().await;
        for join in self.joins {
            if let Err(e) = join.await {
                tracing::error!(error = %e, "worker task panicked");
            }
        }
        tracing::info!("worker pool stopped");
    }
}

async fn worker_loop(
    worker_id: usize,
    registry: Arc<dyn TaskRegistry>,
    queue: Arc<BoundedQueue>,
    executor: Arc<dyn TaskExecutor>,
) {
    tracing::debug!(worker_id, "worker running");

    // close 後もキューが空になるまでは取り出せる。None で終了
    while let Some(envelope) = queue.dequeue().await {
        let task_id = envelope.task_id();

        // IN_PROGRESS にできなければ実行しない
        if let Err(e) = registry.update_status(task_id, TaskStatus::InProgress).await {
            tracing::warn!(worker_id, %task_id, error = %e, "skipping task");
            continue;
        }
        tracing::debug!(worker_id, %task_id, "task in progress");

        // ここでは registry のロックを持っていない（ワーカー同士は並列に実行）
        executor.execute(&envelope).await;

        if let Err(e) = registry.update_status(task_id, TaskStatus::Completed).await {
            tracing::warn!(worker_id, %task_id, error = %e, "could not mark task completed");
            continue;
        }
        tracing::debug!(worker_id, %task_id, "task completed");
    }

    tracing::debug!(worker_id, "worker stopped");
}
