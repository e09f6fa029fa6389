//! Repository for the `projects` table.

use rdvtrack_core::status::{AppointmentStatus, ProjectStatus};
use rdvtrack_core::time_window::TimeWindow;
use rdvtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, daily_quota, monthly_quota, remaining_balance, profitability, \
                       status, external_program_id, created_at, updated_at";

/// Provides CRUD operations for projects. Projects are never hard-deleted.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The remaining balance defaults to the monthly quota and the status to
    /// `active`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, daily_quota, monthly_quota, remaining_balance, profitability, status, external_program_id)
             VALUES ($1, $2, $3, COALESCE($4, $3), COALESCE($5, 0), COALESCE($6, 'active'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.daily_quota)
            .bind(input.monthly_quota)
            .bind(input.remaining_balance)
            .bind(input.profitability)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.external_program_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by exact name (the vendor feed join key).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by the vendor program id recorded during catalog sync.
    pub async fn find_by_external_program_id(
        pool: &PgPool,
        external_program_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE external_program_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(external_program_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY name");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List active projects ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE status = $1 ORDER BY name");
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Active.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                daily_quota = COALESCE($3, daily_quota),
                monthly_quota = COALESCE($4, monthly_quota),
                profitability = COALESCE($5, profitability)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.daily_quota)
            .bind(input.monthly_quota)
            .bind(input.profitability)
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status (pause / resume).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Bump `updated_at` without changing any structural field. Records the
    /// vendor program id if the project does not carry one yet.
    ///
    /// Returns `true` if the row exists.
    pub async fn touch(
        pool: &PgPool,
        id: DbId,
        external_program_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET
                updated_at = NOW(),
                external_program_id = COALESCE(external_program_id, $2)
             WHERE id = $1",
        )
        .bind(id)
        .bind(external_program_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the remaining balance as the monthly quota minus realized
    /// appointments inside `month`, floored at zero.
    pub async fn refresh_remaining_balance(
        pool: &PgPool,
        id: DbId,
        month: TimeWindow,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects SET remaining_balance = GREATEST(
                monthly_quota - (
                    SELECT COUNT(*) FROM appointments
                    WHERE project_id = $1 AND status = $4
                      AND scheduled_at >= $2 AND scheduled_at < $3
                )::INTEGER,
                0
             )
             WHERE id = $1",
        )
        .bind(id)
        .bind(month.start)
        .bind(month.end)
        .bind(AppointmentStatus::Realized.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }
}
