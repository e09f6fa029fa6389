//! Alert entity model and DTOs.

use rdvtrack_core::monitor::Notice;
use rdvtrack_core::status::AlertSeverity;
use rdvtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An alert row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub severity: AlertSeverity,
    pub message: String,
    pub recommended_action: Option<String>,
    pub project_id: Option<DbId>,
    pub alert_date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting an alert.
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub severity: AlertSeverity,
    pub message: String,
    pub recommended_action: Option<String>,
    pub project_id: Option<DbId>,
}

impl From<Notice> for CreateAlert {
    fn from(notice: Notice) -> Self {
        Self {
            severity: notice.severity,
            message: notice.message,
            recommended_action: notice.recommended_action,
            project_id: notice.project_id,
        }
    }
}
