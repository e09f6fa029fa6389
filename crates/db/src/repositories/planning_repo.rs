//! Repository for the `planning_slots` table.

use chrono::NaiveDate;
use rdvtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::planning::{
    CreatePlanningSlot, PlanningSlot, PlanningSlotRow, UpdatePlanningSlot,
};

const COLUMNS: &str =
    "id, slot_date, starts_at, ends_at, project_id, recommendation, created_at, updated_at";

pub struct PlanningRepo;

impl PlanningRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlanningSlot,
    ) -> Result<PlanningSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO planning_slots (slot_date, starts_at, ends_at, project_id, recommendation)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlanningSlot>(&query)
            .bind(input.slot_date)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.project_id)
            .bind(&input.recommendation)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlanningSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planning_slots WHERE id = $1");
        sqlx::query_as::<_, PlanningSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Slots for one date ordered by start time, joined with their project.
    pub async fn list_by_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<PlanningSlotRow>, sqlx::Error> {
        sqlx::query_as::<_, PlanningSlotRow>(
            "SELECT s.id, s.slot_date, s.starts_at, s.ends_at, s.project_id, s.recommendation,
                    s.created_at, s.updated_at,
                    p.name AS project_name,
                    p.daily_quota AS project_daily_quota,
                    p.monthly_quota AS project_monthly_quota,
                    p.status AS project_status
             FROM planning_slots s
             LEFT JOIN projects p ON p.id = s.project_id
             WHERE s.slot_date = $1
             ORDER BY s.starts_at",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Update a slot. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlanningSlot,
    ) -> Result<Option<PlanningSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE planning_slots SET
                slot_date = COALESCE($2, slot_date),
                starts_at = COALESCE($3, starts_at),
                ends_at = COALESCE($4, ends_at),
                project_id = COALESCE($5, project_id),
                recommendation = COALESCE($6, recommendation)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlanningSlot>(&query)
            .bind(id)
            .bind(input.slot_date)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.project_id)
            .bind(&input.recommendation)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM planning_slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
