use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET    /recommendation                    -> recommendation
/// GET    /financial                         -> financial
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommendation", get(dashboard::recommendation))
        .route("/financial", get(dashboard::financial))
}
