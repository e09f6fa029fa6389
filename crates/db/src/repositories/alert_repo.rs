//! Repository for the `alerts` table.

use rdvtrack_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::alert::{Alert, CreateAlert};

const COLUMNS: &str =
    "id, severity, message, recommended_action, project_id, alert_date, created_at";

/// Alerts are written by the threshold monitor and read by the dashboard.
pub struct AlertRepo;

impl AlertRepo {
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (severity, message, recommended_action, project_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.severity.as_str())
            .bind(&input.message)
            .bind(&input.recommended_action)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Alerts dated at or after `since`, newest first, at most `limit`.
    pub async fn list_since(
        pool: &PgPool,
        since: Timestamp,
        limit: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts WHERE alert_date >= $1
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(since)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
