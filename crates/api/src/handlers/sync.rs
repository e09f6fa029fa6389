//! Handlers for the vendor feed synchronization entry points.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rdvtrack_sync::{ActionSyncReport, ActionSyncRequest, ProgramSyncReport, ProgramSyncRequest};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/sync/programs
///
/// The body is optional; `{"dryRun": true}` previews without writing.
pub async fn sync_programs(
    State(state): State<AppState>,
    body: Option<Json<ProgramSyncRequest>>,
) -> AppResult<Json<ProgramSyncReport>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    tracing::info!(dry_run = request.dry_run, "Program sync requested");
    let report = state.sync.programs(&request).await?;
    Ok(Json(report))
}

/// POST /api/v1/sync/actions
///
/// Body fields (all optional): `startDate`, `endDate`, `status`, `dryRun`.
pub async fn sync_actions(
    State(state): State<AppState>,
    body: Option<Json<ActionSyncRequest>>,
) -> AppResult<Json<ActionSyncReport>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    tracing::info!(
        dry_run = request.dry_run,
        start = ?request.start_date,
        end = ?request.end_date,
        status = ?request.status,
        "Action sync requested",
    );
    let today = Utc::now().date_naive();
    let report = state.sync.actions(&request, today).await?;
    Ok(Json(report))
}
