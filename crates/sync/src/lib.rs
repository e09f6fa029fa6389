//! Feed synchronizer: reconciles the TimeOne program catalog and action
//! feed with the record store.
//!
//! A run is a sequential pipeline (fetch, parse, per-item loop). A failed
//! fetch aborts the run; per-item failures are counted and the loop goes on.

pub mod actions;
pub mod error;
pub mod guard;
pub mod programs;
pub mod report;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use chrono::NaiveDate;

pub use actions::ActionSyncRequest;
pub use error::{SyncError, SyncKind};
pub use guard::SyncGuard;
pub use programs::ProgramSyncRequest;
pub use report::{ActionSyncReport, ProgramSyncReport};
pub use source::FeedSource;
pub use store::{PgStore, RecordStore, StoreError};

/// A feed source and a store bound together behind a single-flight guard.
///
/// One instance is shared by every caller in the process, so two runs of
/// the same kind never overlap.
pub struct Synchronizer {
    source: Arc<dyn FeedSource>,
    store: Arc<dyn RecordStore>,
    guard: SyncGuard,
}

impl Synchronizer {
    pub fn new(source: Arc<dyn FeedSource>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            source,
            store,
            guard: SyncGuard::new(),
        }
    }

    pub async fn programs(
        &self,
        request: &ProgramSyncRequest,
    ) -> Result<ProgramSyncReport, SyncError> {
        let _permit = self.guard.try_acquire(SyncKind::Programs)?;
        programs::sync_programs(self.source.as_ref(), self.store.as_ref(), request).await
    }

    /// Run an action sync. `today` anchors the default period.
    pub async fn actions(
        &self,
        request: &ActionSyncRequest,
        today: NaiveDate,
    ) -> Result<ActionSyncReport, SyncError> {
        let _permit = self.guard.try_acquire(SyncKind::Actions)?;
        actions::sync_actions(self.source.as_ref(), self.store.as_ref(), request, today).await
    }
}
