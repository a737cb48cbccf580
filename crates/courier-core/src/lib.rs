//! courier-core
//!
//! Bounded-queue task dispatch: tasks are recorded in a registry, handed to a
//! fixed pool of workers through a capacity-limited FIFO queue, and driven
//! `Pending -> InProgress -> Completed` by whichever worker dequeues them.
//!
//! # Modules
//! - **domain**: ids, task status, task records
//! - **ports**: `TaskRegistry`, `TaskExecutor`, `IdGenerator`, `Clock`
//! - **impls**: `InMemoryRegistry`, `SimulatedWork`
//! - **queue**: `BoundedQueue`
//! - **worker**: `WorkerPool`
//! - **app**: `DispatcherBuilder` / `Dispatcher`
//! - **observability**: status counts and the periodic status monitor
//! - **config** / **error**

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;
pub mod worker;

pub use app::{Dispatcher, DispatcherBuilder};
pub use config::CourierConfig;
pub use domain::{Task, TaskEnvelope, TaskId, TaskStatus};
pub use error::CourierError;
pub use observability::{Stats, StatusCounts};
