use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stocklot_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the uniform
/// `{ "ok": false, "error": ... }` envelope on every failure path.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Payload failed schema validation; carries field-keyed messages.
    #[error("validation failed")]
    Validation(validator::ValidationErrors),

    /// A bad request with a human-readable message (malformed body,
    /// unknown enum value).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid, or expired session. Deliberately carries no
    /// detail: the client cannot learn why a token was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The external store call failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An internal error with a human-readable message.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, field_errors(errors)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!("Unauthorized")),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, json!(format!("{entity} not found"))),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Submission failed. Please try again."),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("An internal error occurred"),
                )
            }
        };

        let body = json!({
            "ok": false,
            "error": error,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Flatten [`validator::ValidationErrors`] into a `{field: [messages]}` map.
///
/// Keys are the wire (camelCase) field names, matching what the client
/// actually submitted.
fn field_errors(errors: &validator::ValidationErrors) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (wire_name(field.as_ref()), json!(messages))
        })
        .collect();
    serde_json::Value::Object(map)
}

/// Convert a Rust field ident to its wire name (`bid_amount` -> `bidAmount`).
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
