use std::sync::Arc;

use rdvtrack_sync::Synchronizer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rdvtrack_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Feed synchronizer. One instance per process so its single-flight
    /// guard covers every request.
    pub sync: Arc<Synchronizer>,
}
