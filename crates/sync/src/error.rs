use rdvtrack_timeone::FeedError;

/// The two kinds of synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncKind {
    Programs,
    Actions,
}

impl SyncKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Programs => "programs",
            Self::Actions => "actions",
        }
    }
}

impl std::fmt::Display for SyncKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures that abort a whole synchronization run.
///
/// Per-item failures never appear here: they are counted in the report.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Feed fetch failed: {0}")]
    Fetch(#[from] FeedError),

    #[error("A {0} synchronization is already running")]
    AlreadyRunning(SyncKind),

    #[error("Invalid sync request: {0}")]
    InvalidRequest(String),
}
