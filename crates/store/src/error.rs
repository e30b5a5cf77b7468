//! Error types for the record store.

/// Errors surfaced by [`RecordStore`](crate::RecordStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Acquiring or signing store API credentials failed.
    #[error("store auth error: {0}")]
    Auth(String),

    /// The HTTP request to the store API failed (network, timeout).
    #[error("store request error: {0}")]
    Request(String),

    /// The store API rejected the call with a non-success status.
    #[error("store API error (status {status}): {body}")]
    Api {
        /// HTTP status code returned by the store API.
        status: u16,
        /// Response body from the store API.
        body: String,
    },
}

/// Errors raised when store configuration is missing or malformed.
///
/// These are fatal at startup: the process refuses to boot rather than
/// failing on every dependent request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
