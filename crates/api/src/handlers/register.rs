//! Handler for `POST /register`.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use stocklot_core::participant::generate_participant_id;
use stocklot_core::records::{write_timestamp, Interest, RegistrationRecord};
use stocklot_store::Table;

use crate::auth::session::{self, SessionIdentity};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::payload::Payload;
use crate::response::Ack;
use crate::state::AppState;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Full name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 5, message = "Valid phone number is required"))]
    pub phone: String,
    #[validate(length(min = 2, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Please select at least one interest"))]
    pub interests: Vec<Interest>,
}

/// POST /register
///
/// Validate the payload, mint a participant identity, issue the session
/// cookie, then append one Registrations row. The cookie is attached to
/// the response even when the append fails: the session is established as
/// soon as the token is issued, and the client can retry the submission
/// without re-registering.
pub async fn register(
    State(state): State<AppState>,
    meta: ClientMeta,
    Payload(input): Payload<RegisterRequest>,
) -> AppResult<Response> {
    input.validate().map_err(AppError::Validation)?;

    let identity = SessionIdentity {
        participant_id: generate_participant_id(),
        full_name: input.full_name.clone(),
        email: input.email.clone(),
    };

    let token = session::issue(&identity, &state.config.session)
        .map_err(|e| AppError::Internal(format!("Session token generation error: {e}")))?;
    let cookie = session::session_cookie(&token, &state.config.session)
        .parse()
        .map_err(|e| AppError::Internal(format!("Invalid session cookie value: {e}")))?;

    let record = RegistrationRecord {
        timestamp: write_timestamp(),
        participant_id: identity.participant_id.clone(),
        full_name: input.full_name,
        company_name: input.company_name,
        email: input.email,
        phone: input.phone,
        country: input.country,
        interests: input.interests,
        client_ip: meta.ip,
        user_agent: meta.user_agent,
    };

    let mut response = match state.store.append(Table::Registrations, record.into_row()).await {
        Ok(()) => {
            tracing::info!(
                participant_id = %identity.participant_id,
                "Registration recorded"
            );
            Json(Ack::ok()).into_response()
        }
        Err(err) => AppError::Store(err).into_response(),
    };
    response.headers_mut().append(SET_COOKIE, cookie);

    Ok(response)
}
