//! Queue module: the bounded hand-off between submitters and workers.

mod bounded;

pub use bounded::{BoundedQueue, MAX_CAPACITY};
