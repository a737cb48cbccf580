//! TaskRegistry port: the single owner of task state.
//!
//! The registry keeps every task by id plus a per-status aggregate. Both live
//! behind one lock in every implementation, so a reader can never see a task's
//! status changed without the aggregate changed with it.

use async_trait::async_trait;

use crate::domain::{Task, TaskId, TaskStatus};
use crate::error::CourierError;
use crate::observability::StatusCounts;

#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Store a new task and count it under its current status.
    ///
    /// Fails with `DuplicateKey` if `id` is already present; the registry is
    /// left unchanged in that case.
    async fn insert(&self, id: TaskId, task: Task) -> Result<(), CourierError>;

    /// Snapshot of one task.
    async fn get(&self, id: TaskId) -> Option<Task>;

    /// Snapshot of every task. Order is unspecified.
    async fn get_all(&self) -> Vec<Task>;

    /// Move a task to `status`, adjusting the aggregate in the same critical
    /// section: decrement the old status, set, increment the new one.
    ///
    /// Any status is accepted; ordering is the caller's contract.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), CourierError>;

    /// Aggregate counts per status.
    async fn counts(&self) -> StatusCounts;

    /// Tasks and aggregate taken from the same point in time.
    async fn snapshot(&self) -> (Vec<Task>, StatusCounts);

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
