use axum::routing::post;
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// POST   /programs                          -> sync_programs
/// POST   /actions                           -> sync_actions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/programs", post(sync::sync_programs))
        .route("/actions", post(sync::sync_actions))
}
