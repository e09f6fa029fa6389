//! Project entity model and DTOs.

use rdvtrack_core::progress::QuotaInput;
use rdvtrack_core::status::ProjectStatus;
use rdvtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Defaults applied to projects auto-created from the vendor program catalog.
pub const SYNCED_MONTHLY_QUOTA: i32 = 30;
pub const SYNCED_DAILY_QUOTA: f64 = 1.0;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub daily_quota: f64,
    pub monthly_quota: i32,
    pub remaining_balance: i32,
    pub profitability: f64,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    /// Vendor program id, recorded by the catalog sync.
    pub external_program_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The quota fields progress is computed from.
    pub fn quota(&self) -> QuotaInput {
        QuotaInput {
            daily_quota: self.daily_quota,
            monthly_quota: self.monthly_quota,
            status: self.status,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub daily_quota: f64,
    #[validate(range(min = 0))]
    pub monthly_quota: i32,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0.0))]
    pub profitability: Option<f64>,
    /// Defaults to `monthly_quota` if omitted.
    pub remaining_balance: Option<i32>,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
    pub external_program_id: Option<String>,
}

impl CreateProject {
    /// A project seeded with the catalog-sync defaults.
    pub fn from_program(name: &str, external_program_id: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            daily_quota: SYNCED_DAILY_QUOTA,
            monthly_quota: SYNCED_MONTHLY_QUOTA,
            profitability: Some(0.0),
            remaining_balance: Some(SYNCED_MONTHLY_QUOTA),
            status: Some(ProjectStatus::Active),
            external_program_id,
        }
    }
}

/// DTO for updating an existing project. All fields are optional.
///
/// The remaining balance is not editable: it is recomputed from realized
/// appointments whenever they change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub daily_quota: Option<f64>,
    #[validate(range(min = 0))]
    pub monthly_quota: Option<i32>,
    #[validate(range(min = 0.0))]
    pub profitability: Option<f64>,
}
