//! Domain model (ids, status, task records).

pub mod ids;
pub mod state;
pub mod task;

pub use ids::TaskId;
pub use state::TaskStatus;
pub use task::{Task, TaskEnvelope};
