//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Deliberately does not touch the external store.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
