//! Handlers for planning slots.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use rdvtrack_core::planning::{self, UNASSIGNED_LABEL};
use rdvtrack_core::time_window;
use rdvtrack_core::types::DbId;
use rdvtrack_db::models::planning::{CreatePlanningSlot, PlanningSlot, UpdatePlanningSlot};
use rdvtrack_db::repositories::{AppointmentRepo, PlanningRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanningQuery {
    /// Defaults to the current UTC date.
    pub date: Option<NaiveDate>,
}

/// A slot as displayed on the planning board.
#[derive(Debug, Serialize)]
pub struct PlanningSlotView {
    #[serde(flatten)]
    pub slot: PlanningSlot,
    pub project_name: String,
    /// Daily completion of the slot's project on the slot's date.
    pub progress: f64,
}

/// GET /api/v1/planning?date=YYYY-MM-DD
pub async fn list_by_date(
    State(state): State<AppState>,
    Query(params): Query<PlanningQuery>,
) -> AppResult<Json<DataResponse<Vec<PlanningSlotView>>>> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let day = time_window::day_of(date);

    let rows = PlanningRepo::list_by_date(&state.pool, date).await?;
    let counts = AppointmentRepo::realized_counts(&state.pool, day, day).await?;

    let data = rows
        .into_iter()
        .map(|row| {
            let realized = row
                .slot
                .project_id
                .and_then(|id| counts.iter().find(|c| c.project_id == id))
                .map_or(0, |c| c.today);
            let progress = planning::slot_progress(row.quota().as_ref(), realized);
            PlanningSlotView {
                project_name: row
                    .project_name
                    .unwrap_or_else(|| UNASSIGNED_LABEL.to_string()),
                slot: row.slot,
                progress,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/planning
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePlanningSlot>,
) -> AppResult<(StatusCode, Json<PlanningSlot>)> {
    planning::validate_slot(input.starts_at, input.ends_at)?;
    let slot = PlanningRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// PUT /api/v1/planning/{id}
///
/// The slot bounds are validated after merging the patch with the stored slot.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlanningSlot>,
) -> AppResult<Json<PlanningSlot>> {
    let existing = PlanningRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("PlanningSlot", id))?;

    let starts_at: NaiveTime = input.starts_at.unwrap_or(existing.starts_at);
    let ends_at: NaiveTime = input.ends_at.unwrap_or(existing.ends_at);
    planning::validate_slot(starts_at, ends_at)?;

    let slot = PlanningRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("PlanningSlot", id))?;
    Ok(Json(slot))
}

/// DELETE /api/v1/planning/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PlanningRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("PlanningSlot", id))
    }
}
