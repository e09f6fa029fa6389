//! Single-flight guard: at most one run per [`SyncKind`] at a time.

use tokio::sync::{Mutex, MutexGuard};

use crate::error::{SyncError, SyncKind};

/// Held for the duration of a run; dropping it releases the kind.
pub type SyncPermit<'a> = MutexGuard<'a, ()>;

#[derive(Debug, Default)]
pub struct SyncGuard {
    programs: Mutex<()>,
    actions: Mutex<()>,
}

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `kind` without waiting. Fails with
    /// [`SyncError::AlreadyRunning`] if a run of that kind is in progress.
    pub fn try_acquire(&self, kind: SyncKind) -> Result<SyncPermit<'_>, SyncError> {
        let lock = match kind {
            SyncKind::Programs => &self.programs,
            SyncKind::Actions => &self.actions,
        };
        lock.try_lock().map_err(|_| {
            tracing::warn!(kind = %kind, "Rejected overlapping sync run");
            SyncError::AlreadyRunning(kind)
        })
    }
}
