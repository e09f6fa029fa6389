use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rdvtrack_core::error::CoreError;
use rdvtrack_sync::SyncError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors alongside database and sync failures.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rdvtrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A synchronization run that failed as a whole.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl AppError {
    pub fn not_found(entity: &'static str, id: rdvtrack_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Sync runs answer with the `{success: false, error}` contract ---
            AppError::Sync(err) => return sync_failure(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn sync_failure(err: &SyncError) -> Response {
    let (status, code) = match err {
        SyncError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FEED_UNAVAILABLE"),
        SyncError::AlreadyRunning(_) => (StatusCode::CONFLICT, "SYNC_IN_PROGRESS"),
        SyncError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
    };
    tracing::warn!(error = %err, "Sync run failed");

    let body = json!({
        "success": false,
        "error": err.to_string(),
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // PostgreSQL foreign key / check violation
                Some("23503") | Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use rdvtrack_sync::SyncKind;
    use rdvtrack_timeone::FeedError;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("Project", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Core(CoreError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sync_failures_map_to_gateway_and_conflict() {
        let fetch = AppError::Sync(SyncError::Fetch(FeedError::HttpStatus {
            status: 500,
            body: String::new(),
        }));
        assert_eq!(fetch.into_response().status(), StatusCode::BAD_GATEWAY);

        let busy = AppError::Sync(SyncError::AlreadyRunning(SyncKind::Actions));
        assert_eq!(busy.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_sync_request_maps_to_400() {
        let err = AppError::Sync(SyncError::InvalidRequest("startDate".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let validation = AppError::from(CoreError::Validation("bad".into())).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
