//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitLedger`: The shared registry of claimed pages and their internal link counts
//! - `ClaimResult`: Whether a claim was the first for its key
//! - `PageOutcome`: Tags the state each crawl task reaches

mod ledger;
mod page_outcome;

// Re-export main types
pub use ledger::{ClaimResult, VisitLedger};
pub use page_outcome::PageOutcome;
