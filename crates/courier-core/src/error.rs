use thiserror::Error;

use crate::domain::TaskId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourierError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("duplicate task id: {0}")]
    DuplicateKey(TaskId),

    /// Enqueue after close. Shutdown order is owned by this crate, so hitting
    /// this is a bug in the caller, not a runtime condition.
    #[error("queue is closed")]
    QueueClosed,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
