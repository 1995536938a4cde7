use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (admin tables).
    pub pool: campo_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Live crop sessions.
    pub dashboard: Arc<Dashboard>,
}
