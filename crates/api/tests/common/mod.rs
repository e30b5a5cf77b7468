//! Shared helpers for API integration tests.
//!
//! Builds the application router against an in-memory [`RecordStore`]
//! fake so tests exercise the same middleware stack as production
//! without touching the external store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use stocklot_api::auth::session::{self, SessionConfig, SessionIdentity};
use stocklot_api::config::ServerConfig;
use stocklot_api::router::build_app_router;
use stocklot_api::state::AppState;
use stocklot_store::{RecordStore, StoreError, Table};

/// Session secret shared by the test router and cookie helpers.
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// In-memory [`RecordStore`] capturing appended rows for assertions.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(Table, Vec<String>)>>,
    fail: AtomicBool,
}

impl MemoryStore {
    /// Rows appended to `table`, in append order.
    pub async fn rows(&self, table: Table) -> Vec<Vec<String>> {
        self.rows
            .lock()
            .await
            .iter()
            .filter(|(t, _)| *t == table)
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Total number of appended rows across all tables.
    pub async fn total_rows(&self) -> usize {
        self.rows.lock().await.len()
    }

    /// Make every subsequent append fail, simulating a store outage.
    pub fn fail_appends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Request("simulated outage".to_string()));
        }
        self.rows.lock().await.push((table, row));
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            cookie_secure: false,
        },
    }
}

/// Build the full application router backed by the given fake store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A distinct registered identity for test `n`.
pub fn test_identity(n: usize) -> SessionIdentity {
    SessionIdentity {
        participant_id: format!("participant{n:03}"),
        full_name: format!("Bidder {n}"),
        email: format!("bidder{n}@example.com"),
    }
}

/// Issue a `Cookie` header value holding a valid session for `identity`.
pub fn session_cookie_for(identity: &SessionIdentity) -> String {
    let config = SessionConfig {
        secret: TEST_SECRET.to_string(),
        cookie_secure: false,
    };
    let token = session::issue(identity, &config).expect("token issue should succeed");
    format!("{}={token}", session::SESSION_COOKIE)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard failure envelope and return its `error` value.
pub async fn error_of(response: Response, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    json["error"].clone()
}
