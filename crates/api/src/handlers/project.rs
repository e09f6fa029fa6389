//! Handlers for the `/projects` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rdvtrack_core::progress::{self, ProjectProgress, QuotaTotals, RealizedCounts};
use rdvtrack_core::time_window;
use rdvtrack_core::types::{DbId, Timestamp};
use rdvtrack_db::models::project::{CreateProject, Project, UpdateProject};
use rdvtrack_db::repositories::{AppointmentRepo, ProjectRepo};
use rdvtrack_db::DbPool;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A project with its derived progress figures.
#[derive(Debug, Serialize)]
pub struct ProjectWithProgress {
    #[serde(flatten)]
    pub project: Project,
    pub progress: ProjectProgress,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectWithProgress>,
    pub totals: QuotaTotals,
}

/// All projects ordered by name, each with progress as of `now`.
pub async fn load_with_progress(
    pool: &DbPool,
    now: Timestamp,
) -> Result<Vec<ProjectWithProgress>, sqlx::Error> {
    let projects = ProjectRepo::list(pool).await?;
    let counts: HashMap<DbId, RealizedCounts> = AppointmentRepo::realized_counts(
        pool,
        time_window::today(now),
        time_window::month_to_date(now),
    )
    .await?
    .into_iter()
    .map(|row| {
        (
            row.project_id,
            RealizedCounts {
                today: row.today,
                month: row.month,
            },
        )
    })
    .collect();

    Ok(projects
        .into_iter()
        .map(|project| {
            let realized = counts.get(&project.id).copied().unwrap_or_default();
            let progress = progress::compute(&project.quota(), realized);
            ProjectWithProgress { project, progress }
        })
        .collect())
}

async fn find_project(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectListResponse>> {
    let projects = load_with_progress(&state.pool, Utc::now()).await?;
    let quotas: Vec<_> = projects.iter().map(|p| p.project.quota()).collect();
    Ok(Json(ProjectListResponse {
        totals: progress::quota_totals(&quotas),
        projects,
    }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithProgress>> {
    let project = find_project(&state.pool, id).await?;
    let now = Utc::now();
    let realized = RealizedCounts {
        today: AppointmentRepo::count_realized(&state.pool, id, time_window::today(now)).await?,
        month: AppointmentRepo::count_realized(&state.pool, id, time_window::month_to_date(now))
            .await?,
    };
    let progress = progress::compute(&project.quota(), realized);
    Ok(Json(ProjectWithProgress { project, progress }))
}

/// PUT /api/v1/projects/{id}
///
/// A monthly quota change recomputes the remaining balance.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let mut project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;

    if input.monthly_quota.is_some() {
        let month = time_window::month_to_date(Utc::now());
        ProjectRepo::refresh_remaining_balance(&state.pool, id, month).await?;
        project = find_project(&state.pool, id).await?;
    }
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/toggle-pause
pub async fn toggle_pause(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let current = find_project(&state.pool, id).await?;
    let project = ProjectRepo::set_status(&state.pool, id, current.status.toggled())
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    tracing::info!(project_id = id, status = %project.status, "Project status toggled");
    Ok(Json(project))
}
