use std::time::Duration;

use async_trait::async_trait;

use crate::domain::TaskEnvelope;
use crate::ports::TaskExecutor;

/// Fixed-duration stand-in for real work. Ignores the payload.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedWork {
    duration: Duration,
}

impl SimulatedWork {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl TaskExecutor for SimulatedWork {
    async fn execute(&self, envelope: &TaskEnvelope) {
        tracing::trace!(
            task_id = %envelope.task_id(),
            duration_ms = self.duration.as_millis() as u64,
            "simulating work"
        );
        tokio::time::sleep(self.duration).await;
    }
}
