use std::sync::Arc;

use plantmon_storage::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: plantmon_db::DbPool,
    /// Server configuration (JWT settings, upload limit, ...).
    pub config: Arc<ServerConfig>,
    /// Backend that holds plant images.
    pub images: Arc<dyn ImageStore>,
}
