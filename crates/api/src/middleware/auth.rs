//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use crate::auth::session::{self, SessionIdentity};
use crate::error::AppError;
use crate::state::AppState;

/// Registered participant extracted from the signed session cookie.
///
/// Use this as an extractor parameter in any handler that requires a
/// session:
///
/// ```ignore
/// async fn my_handler(SessionUser(identity): SessionUser) -> AppResult<Json<Ack>> {
///     tracing::info!(participant_id = %identity.participant_id, "handling request");
///     Ok(Json(Ack::ok()))
/// }
/// ```
///
/// Rejects with 401 when the cookie is missing or fails verification; the
/// two cases are deliberately indistinguishable to the client.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionIdentity);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(session::token_from_cookie_header)
            .and_then(|token| session::verify(token, &state.config.session))
            .ok_or(AppError::Unauthorized)?;

        Ok(SessionUser(identity))
    }
}
