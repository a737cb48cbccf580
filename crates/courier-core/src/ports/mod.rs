//! Ports: ディスパッチエンジンと差し替え可能な部品の境界
//!
//! - **TaskRegistry**: task storage plus status aggregate
//! - **TaskExecutor**: the work step run by each worker
//! - **IdGenerator** / **Clock**: id allocation for new tasks

pub mod clock;
pub mod executor;
pub mod id_generator;
pub mod task_registry;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::executor::TaskExecutor;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::task_registry::TaskRegistry;
