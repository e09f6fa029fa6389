//! The ingestion loop.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rdvtrack_core::time_window;
use rdvtrack_sync::{ActionSyncRequest, ProgramSyncRequest, SyncError, Synchronizer};
use tokio_util::sync::CancellationToken;

use crate::config::WorkerConfig;

/// Action sync request for the `lookback_days` days ending `today`, approved
/// actions only.
pub fn action_request(today: NaiveDate, lookback_days: i64) -> ActionSyncRequest {
    let (start, end) = time_window::lookback_period(today, lookback_days);
    ActionSyncRequest {
        start_date: Some(start.format("%Y-%m-%d").to_string()),
        end_date: Some(end.format("%Y-%m-%d").to_string()),
        status: None,
        dry_run: false,
    }
}

/// One ingestion pass: programs first so that new programs exist as
/// projects before their actions are matched.
///
/// A failed catalog sync is logged and the action sync still runs for the
/// projects already known. Only the action sync's outcome is returned.
pub async fn run_once(
    sync: &Synchronizer,
    lookback_days: i64,
    today: NaiveDate,
) -> Result<(), SyncError> {
    match sync.programs(&ProgramSyncRequest::default()).await {
        Ok(programs) => tracing::info!(message = %programs.message, "Program sync finished"),
        Err(e) => tracing::warn!(error = %e, "Program sync failed, continuing with actions"),
    }

    let actions = sync.actions(&action_request(today, lookback_days), today).await?;
    tracing::info!(message = %actions.message, "Action sync finished");
    Ok(())
}

/// Run ingestion passes every `config.interval()` until `cancel` is triggered.
///
/// A failed pass is logged and retried on the next tick.
pub async fn run(sync: Arc<Synchronizer>, config: WorkerConfig, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = config.interval_secs,
        lookback_days = config.lookback_days,
        "Ingestion scheduler started"
    );

    let mut interval = tokio::time::interval(config.interval());

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ingestion scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                let today = Utc::now().date_naive();
                if let Err(e) = run_once(&sync, config.lookback_days, today).await {
                    tracing::error!(error = %e, "Ingestion pass failed");
                }
            }
        }
    }
}
