/// Outcome definitions for a single crawl task
///
/// Every `crawl(url)` task moves strictly forward through these states and ends in
/// exactly one terminal state. Skips are ordinary control flow, not errors.
use std::fmt;

/// Represents the state of one crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Active States =====
    /// Task passed the page-ceiling check and holds a gate slot
    Admitted,

    /// Page is being fetched
    Fetching,

    /// Links were extracted and children are being spawned
    FanningOut,

    // ===== Terminal Skip States =====
    /// Page ceiling was already reached when the task started
    LimitReached,

    /// URL could not be parsed or normalized
    ParseFailed,

    /// URL is on a different host than the seed
    ScopeRejected,

    /// Page was already claimed by another task
    DuplicateRejected,

    // ===== Terminal Error States =====
    /// Fetch failed (network, HTTP status, or non-HTML content)
    FetchFailed,

    /// Link extraction failed
    ExtractFailed,

    /// The concurrency gate was closed before a slot was granted
    GateClosed,

    // ===== Terminal Success States =====
    /// Page was fetched and all in-scope children were handed off
    Done,
}

impl PageOutcome {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Admitted | Self::Fetching | Self::FanningOut)
    }

    /// Returns true if the task was silently skipped
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::LimitReached | Self::ParseFailed | Self::ScopeRejected | Self::DuplicateRejected
        )
    }

    /// Returns true if this represents a reported, branch-local error
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed | Self::ExtractFailed | Self::GateClosed
        )
    }

    /// Returns true if the page was fetched and processed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns a stable snake_case name for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::Fetching => "fetching",
            Self::FanningOut => "fanning_out",
            Self::LimitReached => "limit_reached",
            Self::ParseFailed => "parse_failed",
            Self::ScopeRejected => "scope_rejected",
            Self::DuplicateRejected => "duplicate_rejected",
            Self::FetchFailed => "fetch_failed",
            Self::ExtractFailed => "extract_failed",
            Self::GateClosed => "gate_closed",
            Self::Done => "done",
        }
    }

    /// Returns every terminal outcome, in report order
    pub fn terminal_outcomes() -> [Self; 8] {
        [
            Self::Done,
            Self::DuplicateRejected,
            Self::ScopeRejected,
            Self::LimitReached,
            Self::ParseFailed,
            Self::FetchFailed,
            Self::ExtractFailed,
            Self::GateClosed,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
