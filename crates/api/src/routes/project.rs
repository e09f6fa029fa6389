use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{appointment, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// POST   /{id}/toggle-pause                 -> toggle_pause
/// GET    /{id}/appointments                 -> appointment::list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route("/{id}/toggle-pause", post(project::toggle_pause))
        .route("/{id}/appointments", get(appointment::list_by_project))
}
