//! Route definitions for download tracking.

use axum::routing::get;
use axum::Router;

use crate::handlers::downloads;
use crate::state::AppState;

/// ```text
/// GET /track/download?catalogue=slug -> track_download (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/track/download", get(downloads::track_download))
}
