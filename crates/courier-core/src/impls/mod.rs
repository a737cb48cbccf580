//! Port implementations.
//!
//! - **InMemoryRegistry**: the process-local task registry
//! - **SimulatedWork**: fixed-delay executor

pub mod inmem_registry;
pub mod simulated_work;

pub use self::inmem_registry::InMemoryRegistry;
pub use self::simulated_work::SimulatedWork;
