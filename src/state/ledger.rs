//! Visit ledger shared by every crawl task
//!
//! The ledger maps normalized URLs to the number of times each one was claimed.
//! Its only mutation is [`VisitLedger::claim`], which is atomic with respect to
//! every other ledger operation, so exactly one caller ever wins the right to
//! fetch a given page.

use crate::url::NormalizedUrl;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Result of claiming a key in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResult {
    /// The key was absent and is now recorded with a count of 1
    FirstClaim,

    /// The key was already present; its count was incremented
    AlreadyClaimed,
}

impl ClaimResult {
    /// Returns true if this claim grants the right to fetch the page
    pub fn is_first(&self) -> bool {
        matches!(self, Self::FirstClaim)
    }
}

/// Thread-safe registry of visited pages
///
/// The lock is only ever held for the duration of a single map operation; no
/// caller can hold it across an await point or a fetch.
#[derive(Debug, Default)]
pub struct VisitLedger {
    pages: Mutex<HashMap<NormalizedUrl, u32>>,
}

impl VisitLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `key`
    ///
    /// Inserts the key with a count of 1 and returns [`ClaimResult::FirstClaim`] if
    /// it was absent, otherwise increments its count and returns
    /// [`ClaimResult::AlreadyClaimed`].
    pub fn claim(&self, key: &NormalizedUrl) -> ClaimResult {
        let mut pages = self.pages();

        match pages.get_mut(key) {
            Some(count) => {
                *count += 1;
                ClaimResult::AlreadyClaimed
            }
            None => {
                pages.insert(key.clone(), 1);
                ClaimResult::FirstClaim
            }
        }
    }

    /// Returns the number of distinct pages claimed so far
    pub fn size(&self) -> usize {
        self.pages().len()
    }

    /// Returns the current count for `key`, if it has been claimed
    pub fn count(&self, key: &NormalizedUrl) -> Option<u32> {
        self.pages().get(key).copied()
    }

    /// Returns a point-in-time copy of every entry
    ///
    /// Entries come back in no particular order; sorting is the report's job.
    pub fn snapshot(&self) -> Vec<(NormalizedUrl, u32)> {
        self.pages()
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to read.
    fn pages(&self) -> MutexGuard<'_, HashMap<NormalizedUrl, u32>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
