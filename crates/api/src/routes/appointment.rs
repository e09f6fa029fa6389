use axum::routing::{post, put};
use axum::Router;

use crate::handlers::appointment;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// POST   /                                  -> create
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(appointment::create))
        .route("/{id}", put(appointment::update).delete(appointment::delete))
}
