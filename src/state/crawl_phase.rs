/// Crawl phase definitions
///
/// A crawl validates its inputs, runs the frontier loop, and finishes. Rejection
/// is only possible before any fetch happens.
use std::fmt;

/// Represents the lifecycle phase of one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    /// Inputs are being normalized and checked; no I/O yet
    #[default]
    Validating,

    /// The frontier loop is fetching pages
    Running,

    // ===== Terminal States =====
    /// The loop ended; a report was produced
    Completed,

    /// Validation failed (invalid URL, forbidden host or bad parameter)
    Rejected,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Validating, Self::Running)
                | (Self::Validating, Self::Rejected)
                | (Self::Running, Self::Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
