//! TaskExecutor port: the work step a worker runs between `InProgress` and
//! `Completed`.

use async_trait::async_trait;

use crate::domain::TaskEnvelope;

/// Executes one task.
///
/// Work cannot fail in this model. An executor that needs failure reporting
/// would also need a terminal failed status; the registry already accepts any
/// status, so only this trait and the worker loop would change.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, envelope: &TaskEnvelope);
}
