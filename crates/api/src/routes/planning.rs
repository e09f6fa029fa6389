use axum::routing::{get, put};
use axum::Router;

use crate::handlers::planning;
use crate::state::AppState;

/// Routes mounted at `/planning`.
///
/// ```text
/// GET    /?date=YYYY-MM-DD                  -> list_by_date
/// POST   /                                  -> create
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(planning::list_by_date).post(planning::create))
        .route("/{id}", put(planning::update).delete(planning::delete))
}
