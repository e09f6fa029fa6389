use axum::routing::get;
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /                                  -> list_today
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(alert::list_today))
}
