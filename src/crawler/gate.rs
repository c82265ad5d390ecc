//! Concurrency gate bounding simultaneous fetches
//!
//! A counting semaphore with `max_concurrency` slots. A slot is held through a
//! [`GatePermit`], which releases it when dropped, so every exit path out of a
//! crawl task gives its slot back.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting admission control for fetches
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// An occupied gate slot
///
/// The slot is freed when the permit is dropped or explicitly released.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    /// Frees the slot now instead of at end of scope
    pub fn release(self) {}
}

impl ConcurrencyGate {
    /// Creates a gate with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free, then occupies it
    ///
    /// Returns `None` only if the underlying semaphore has been closed. Nothing
    /// outside this module's tests closes it.
    pub async fn acquire(&self) -> Option<GatePermit> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await.ok()?;
        Some(GatePermit { _permit: permit })
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Number of slots currently occupied
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }

    #[cfg(test)]
    pub(crate) fn close(&self) {
        self.semaphore.close();
    }
}
