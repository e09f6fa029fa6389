//! Handlers for alerts.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rdvtrack_core::time_window;
use rdvtrack_db::models::alert::Alert;
use rdvtrack_db::repositories::AlertRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Most alerts returned by the listing.
const ALERT_LIST_LIMIT: i64 = 10;

/// GET /api/v1/alerts
///
/// Today's alerts, newest first.
pub async fn list_today(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let since = time_window::today(Utc::now()).start;
    let alerts = AlertRepo::list_since(&state.pool, since, ALERT_LIST_LIMIT).await?;
    Ok(Json(DataResponse { data: alerts }))
}
