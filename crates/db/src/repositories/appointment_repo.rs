//! Repository for the `appointments` table.

use rdvtrack_core::status::AppointmentStatus;
use rdvtrack_core::time_window::TimeWindow;
use rdvtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, CreateAppointment, FinancialRow, RealizedCountRow, UpdateAppointment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, scheduled_at, operator, status, action_id, commission, \
                       cart_amount, action_type, created_at, updated_at";

/// Provides CRUD and counting operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new appointment, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `realized`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments
                (project_id, scheduled_at, operator, status, action_id, commission, cart_amount, action_type)
             VALUES ($1, $2, $3, COALESCE($4, 'realized'), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(input.project_id)
            .bind(input.scheduled_at)
            .bind(&input.operator)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.action_id)
            .bind(input.commission)
            .bind(input.cart_amount)
            .bind(input.action_type.map(|t| t.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the appointment imported from a given vendor action, if any.
    pub async fn find_by_action_id(
        pool: &PgPool,
        action_id: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE action_id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(action_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's appointments, most recent first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments WHERE project_id = $1 ORDER BY scheduled_at DESC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update timestamp, operator and status. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                scheduled_at = COALESCE($2, scheduled_at),
                operator = COALESCE($3, operator),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(input.scheduled_at)
            .bind(&input.operator)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an appointment. Returns the owning project id if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM appointments WHERE id = $1 RETURNING project_id")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(project_id,)| project_id))
    }

    /// Count a project's realized appointments inside `window`.
    pub async fn count_realized(
        pool: &PgPool,
        project_id: DbId,
        window: TimeWindow,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments
             WHERE project_id = $1 AND status = $2
               AND scheduled_at >= $3 AND scheduled_at < $4",
        )
        .bind(project_id)
        .bind(AppointmentStatus::Realized.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Realized counts for every project that has any, for the given day
    /// and month-to-date windows.
    pub async fn realized_counts(
        pool: &PgPool,
        day: TimeWindow,
        month: TimeWindow,
    ) -> Result<Vec<RealizedCountRow>, sqlx::Error> {
        sqlx::query_as::<_, RealizedCountRow>(
            "SELECT project_id,
                    COUNT(*) FILTER (WHERE scheduled_at >= $2 AND scheduled_at < $3) AS today,
                    COUNT(*) FILTER (WHERE scheduled_at >= $4 AND scheduled_at < $5) AS month
             FROM appointments
             WHERE status = $1
             GROUP BY project_id",
        )
        .bind(AppointmentStatus::Realized.as_str())
        .bind(day.start)
        .bind(day.end)
        .bind(month.start)
        .bind(month.end)
        .fetch_all(pool)
        .await
    }

    /// Monetary columns of every appointment.
    pub async fn list_financial(pool: &PgPool) -> Result<Vec<FinancialRow>, sqlx::Error> {
        sqlx::query_as::<_, FinancialRow>(
            "SELECT status, action_type, commission, cart_amount FROM appointments",
        )
        .fetch_all(pool)
        .await
    }
}
