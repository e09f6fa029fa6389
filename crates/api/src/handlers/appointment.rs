//! Handlers for appointments (RDVs).
//!
//! Every write refreshes the owning project's remaining balance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rdvtrack_core::time_window;
use rdvtrack_core::types::DbId;
use rdvtrack_db::models::appointment::{Appointment, CreateAppointment, UpdateAppointment};
use rdvtrack_db::repositories::{AppointmentRepo, ProjectRepo};
use rdvtrack_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn refresh_balance(pool: &DbPool, project_id: DbId) -> Result<(), sqlx::Error> {
    let month = time_window::month_to_date(Utc::now());
    ProjectRepo::refresh_remaining_balance(pool, project_id, month).await
}

/// GET /api/v1/projects/{id}/appointments
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Appointment>>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    let appointments = AppointmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: appointments }))
}

/// POST /api/v1/appointments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    input.validate()?;
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::not_found("Project", input.project_id))?;

    let appointment = AppointmentRepo::create(&state.pool, &input).await?;
    refresh_balance(&state.pool, appointment.project_id).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/v1/appointments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<Json<Appointment>> {
    input.validate()?;
    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Appointment", id))?;
    refresh_balance(&state.pool, appointment.project_id).await?;
    Ok(Json(appointment))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let project_id = AppointmentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Appointment", id))?;
    refresh_balance(&state.pool, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
