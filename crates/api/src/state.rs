use std::sync::Arc;

use stocklot_store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`). The store is injected
/// as a trait object so tests can substitute an in-memory fake without
/// touching process-wide state.
#[derive(Clone)]
pub struct AppState {
    /// Append-only record store client, built once per process.
    pub store: Arc<dyn RecordStore>,
    /// Server configuration (session secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}
