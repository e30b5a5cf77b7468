//! Shared response envelope for submission handlers.
//!
//! Successful submissions answer `{ "ok": true }`; failures are produced
//! by [`AppError`](crate::error::AppError) as `{ "ok": false, "error": ... }`.

use serde::Serialize;

/// Standard `{ "ok": true }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
