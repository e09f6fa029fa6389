//! Appointment (RDV) entity model and DTOs.

use rdvtrack_core::financial::FinancialEntry;
use rdvtrack_core::status::{ActionType, AppointmentStatus};
use rdvtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An appointment row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub project_id: DbId,
    pub scheduled_at: Timestamp,
    pub operator: String,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    /// Vendor action id; unique when present.
    pub action_id: Option<String>,
    pub commission: Option<f64>,
    pub cart_amount: Option<f64>,
    pub action_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    pub fn action_type(&self) -> Option<ActionType> {
        self.action_type.as_deref().and_then(ActionType::from_str)
    }
}

/// DTO for creating an appointment.
///
/// Manual entry supplies the first four fields. The vendor fields are only
/// set by the feed synchronizer and cannot be supplied over the API.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointment {
    pub project_id: DbId,
    pub scheduled_at: Timestamp,
    #[validate(length(min = 1, max = 200))]
    pub operator: String,
    /// Defaults to `realized` if omitted.
    pub status: Option<AppointmentStatus>,
    #[serde(skip_deserializing)]
    pub action_id: Option<String>,
    #[serde(skip_deserializing)]
    pub commission: Option<f64>,
    #[serde(skip_deserializing)]
    pub cart_amount: Option<f64>,
    #[serde(skip_deserializing)]
    pub action_type: Option<ActionType>,
}

/// DTO for editing an appointment: timestamp, operator and status only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAppointment {
    pub scheduled_at: Option<Timestamp>,
    #[validate(length(min = 1, max = 200))]
    pub operator: Option<String>,
    pub status: Option<AppointmentStatus>,
}

/// The monetary columns of an appointment, for dashboard aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct FinancialRow {
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub action_type: Option<String>,
    pub commission: Option<f64>,
    pub cart_amount: Option<f64>,
}

impl From<FinancialRow> for FinancialEntry {
    fn from(row: FinancialRow) -> Self {
        FinancialEntry {
            status: row.status,
            action_type: row.action_type.as_deref().and_then(ActionType::from_str),
            commission: row.commission,
            cart_amount: row.cart_amount,
        }
    }
}

/// Realized appointment counts for one project over the day and month.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct RealizedCountRow {
    pub project_id: DbId,
    pub today: i64,
    pub month: i64,
}
