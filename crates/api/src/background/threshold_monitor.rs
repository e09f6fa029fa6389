//! Periodic threshold monitor.
//!
//! Every tick loads the progress of active projects, evaluates it against
//! the daily checkpoints and stores the resulting alerts. The monitor state
//! lives for as long as the task runs.

use std::time::Duration;

use chrono::{Local, Utc};
use rdvtrack_core::monitor::{self, MonitorState, ProjectSnapshot};
use rdvtrack_core::status::ProjectStatus;
use rdvtrack_db::models::alert::CreateAlert;
use rdvtrack_db::repositories::AlertRepo;
use rdvtrack_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::handlers::project::load_with_progress;

/// Run the monitor loop until `cancel` is triggered.
pub async fn run(pool: DbPool, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Threshold monitor started");

    let mut state = MonitorState::new();
    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Threshold monitor stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = tick(&pool, &mut state).await {
                    tracing::error!(error = %e, "Threshold monitor: evaluation failed");
                }
            }
        }
    }
}

async fn tick(pool: &DbPool, state: &mut MonitorState) -> Result<(), sqlx::Error> {
    let snapshot: Vec<ProjectSnapshot> = load_with_progress(pool, Utc::now())
        .await?
        .into_iter()
        .filter(|p| p.project.status == ProjectStatus::Active)
        .map(|p| ProjectSnapshot {
            project_id: p.project.id,
            name: p.project.name,
            daily_rate: p.progress.daily_rate,
        })
        .collect();

    let notices = monitor::evaluate(state, &snapshot, Local::now().naive_local());
    if notices.is_empty() {
        tracing::debug!(projects = snapshot.len(), "Threshold monitor: nothing to report");
        return Ok(());
    }

    for notice in notices {
        let alert = AlertRepo::create(pool, &CreateAlert::from(notice)).await?;
        tracing::info!(
            alert_id = alert.id,
            severity = %alert.severity,
            project_id = ?alert.project_id,
            "Alert raised",
        );
    }
    Ok(())
}
