//! Planning slot entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use rdvtrack_core::progress::QuotaInput;
use rdvtrack_core::status::ProjectStatus;
use rdvtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A planning slot row from the `planning_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanningSlot {
    pub id: DbId,
    pub slot_date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub project_id: Option<DbId>,
    pub recommendation: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A slot joined with the fields of its project needed to recompute progress.
#[derive(Debug, Clone, FromRow)]
pub struct PlanningSlotRow {
    #[sqlx(flatten)]
    pub slot: PlanningSlot,
    pub project_name: Option<String>,
    pub project_daily_quota: Option<f64>,
    pub project_monthly_quota: Option<i32>,
    pub project_status: Option<String>,
}

impl PlanningSlotRow {
    /// Quota of the slot's project, `None` for unassigned slots.
    pub fn quota(&self) -> Option<QuotaInput> {
        Some(QuotaInput {
            daily_quota: self.project_daily_quota?,
            monthly_quota: self.project_monthly_quota?,
            status: self
                .project_status
                .as_deref()
                .and_then(ProjectStatus::from_str)?,
        })
    }
}

/// DTO for creating a planning slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanningSlot {
    pub slot_date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub project_id: Option<DbId>,
    pub recommendation: Option<String>,
}

/// DTO for updating a planning slot. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlanningSlot {
    pub slot_date: Option<NaiveDate>,
    pub starts_at: Option<NaiveTime>,
    pub ends_at: Option<NaiveTime>,
    pub project_id: Option<DbId>,
    pub recommendation: Option<String>,
}
