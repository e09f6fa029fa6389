pub mod alert;
pub mod appointment;
pub mod dashboard;
pub mod health;
pub mod planning;
pub mod project;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sync/programs                       run program catalog sync (POST)
/// /sync/actions                        run action sync (POST)
///
/// /projects                            list with stats, create
/// /projects/{id}                       get, update
/// /projects/{id}/toggle-pause          pause / resume (POST)
/// /projects/{id}/appointments          list appointments
///
/// /appointments                        create
/// /appointments/{id}                   update, delete
///
/// /planning?date=YYYY-MM-DD            list for a date, create
/// /planning/{id}                       update, delete
///
/// /alerts                              today's alerts
///
/// /dashboard/recommendation            best project to work on
/// /dashboard/financial                 commission / sales aggregates
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sync", sync::router())
        .nest("/projects", project::router())
        .nest("/appointments", appointment::router())
        .nest("/planning", planning::router())
        .nest("/alerts", alert::router())
        .nest("/dashboard", dashboard::router())
}
