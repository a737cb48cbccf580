//! Capacity-limited FIFO hand-off between submission and the worker pool.

use tokio::sync::{Mutex, Semaphore, mpsc};

use crate::domain::TaskEnvelope;
use crate::error::CourierError;

/// Largest capacity the underlying channel can represent.
pub const MAX_CAPACITY: usize = Semaphore::MAX_PERMITS;

/// Bounded FIFO queue of task envelopes.
///
/// Built on a bounded `mpsc` channel:
/// - `enqueue` waits for a free slot when full (back-pressure on the submitter).
/// - `dequeue` waits while empty and open; receivers take turns through a
///   fair mutex, so order is global FIFO across all producers.
/// - `close` drops the queue's sender. Buffered envelopes stay retrievable and
///   `dequeue` returns `None` once they are gone.
pub struct BoundedQueue {
    capacity: usize,
    tx: Mutex<Option<mpsc::Sender<TaskEnvelope>>>,
    rx: Mutex<mpsc::Receiver<TaskEnvelope>>,
}

impl BoundedQueue {
    pub fn new(capacity: usize) -> Result<Self, CourierError> {
        if capacity == 0 {
            return Err(CourierError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        if capacity > MAX_CAPACITY {
            return Err(CourierError::InvalidConfig(format!(
                "queue capacity must be at most {MAX_CAPACITY}"
            )));
        }
        let (tx, rx) = mpsc::channel(capacity);
        Ok(Self {
            capacity,
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(rx),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an envelope, waiting while the queue is full.
    ///
    /// Returns `QueueClosed` after `close()`.
    pub async fn enqueue(&self, envelope: TaskEnvelope) -> Result<(), CourierError> {
        // Clone the sender out so the lock is not held while waiting for a slot.
        let tx = self
            .tx
            .lock()
            .await
            .clone()
            .ok_or(CourierError::QueueClosed)?;
        tx.send(envelope)
            .await
            .map_err(|_| CourierError::QueueClosed)
    }

    /// Oldest envelope, waiting while empty. `None` once closed and drained.
    pub async fn dequeue(&self) -> Option<TaskEnvelope> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }

    /// Refuse further enqueues. Calling it again is a no-op.
    pub async fn close(&self) {
        self.tx.lock().await.take();
    }

    pub async fn is_closed(&self) -> bool {
        self.tx.lock().await.is_none()
    }
}
