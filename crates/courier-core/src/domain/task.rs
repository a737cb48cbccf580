use serde::{Deserialize, Serialize};

use super::{TaskId, TaskStatus};

/// Id + payload: what travels through the queue to a worker.
///
/// Status is deliberately absent. The registry owns it, and a copy carried
/// through the queue would go stale the moment a worker picked it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    task_id: TaskId,
    payload: serde_json::Value,
}

impl TaskEnvelope {
    pub fn new(task_id: TaskId, payload: serde_json::Value) -> Self {
        Self { task_id, payload }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

/// A unit of work as stored in the registry.
///
/// `id`, `payload` and `status` are the externally visible shape; keep the
/// field names stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub payload: serde_json::Value,
    pub status: TaskStatus,
}

impl Task {
    /// New task in `Pending`.
    pub fn new(id: TaskId, payload: serde_json::Value) -> Self {
        Self {
            id,
            payload,
            status: TaskStatus::Pending,
        }
    }

    pub fn envelope(&self) -> TaskEnvelope {
        TaskEnvelope::new(self.id, self.payload.clone())
    }
}
