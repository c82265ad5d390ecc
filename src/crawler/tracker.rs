//! Completion tracker for the dynamically growing task graph
//!
//! Every crawl task is registered before it is spawned and holds a [`TaskGuard`]
//! until it has finished, including spawning (and registering) its own children.
//! A parent's guard is therefore always dropped after its children's guards were
//! created, so the outstanding count only reaches zero once the whole graph is done.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counts outstanding crawl tasks and wakes waiters when none remain
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: AtomicUsize,
    idle: Notify,
}

/// Registration of one outstanding task; decrements the count on drop
#[derive(Debug)]
pub struct TaskGuard {
    tracker: Arc<CompletionTracker>,
}

impl CompletionTracker {
    /// Creates a tracker with no outstanding tasks
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a task that is about to be spawned
    pub fn register(self: &Arc<Self>) -> TaskGuard {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Number of registered tasks that have not finished
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until the outstanding count is zero
    ///
    /// Returns immediately if nothing is outstanding.
    pub async fn wait(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            // Register interest before checking, so a drop to zero between the
            // check and the await cannot be missed.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.tracker.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            tracing::trace!("all crawl tasks finished");
            self.tracker.idle.notify_waiters();
        }
    }
}
