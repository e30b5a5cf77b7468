//! Handler for `POST /bids`.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use stocklot_core::records::{write_timestamp, BidRecord, BundleSlug};
use stocklot_store::Table;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::payload::Payload;
use crate::response::Ack;
use crate::state::AppState;

/// Request body for `POST /bids`.
///
/// An unknown `bundleSlug` is rejected at deserialization. A corrected
/// bid is a new submission; there is no update-in-place.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    pub bundle_slug: BundleSlug,
    #[validate(range(exclusive_min = 0.0, message = "Bid amount must be greater than 0"))]
    pub bid_amount: Option<f64>,
    #[validate(length(max = 2000, message = "Notes must be less than 2000 characters"))]
    pub notes: Option<String>,
}

/// POST /bids
///
/// Requires a session. Appends one Bids row per submission.
pub async fn submit_bid(
    SessionUser(identity): SessionUser,
    State(state): State<AppState>,
    meta: ClientMeta,
    Payload(input): Payload<BidRequest>,
) -> AppResult<Json<Ack>> {
    input.validate().map_err(AppError::Validation)?;

    let bundle = input.bundle_slug;
    let record = BidRecord {
        timestamp: write_timestamp(),
        participant_id: identity.participant_id.clone(),
        email: identity.email,
        bundle_slug: bundle,
        bid_amount: input.bid_amount,
        notes: input.notes,
        client_ip: meta.ip,
        user_agent: meta.user_agent,
    };

    state.store.append(Table::Bids, record.into_row()).await?;

    tracing::info!(
        participant_id = %identity.participant_id,
        bundle = bundle.as_str(),
        "Bid recorded"
    );

    Ok(Json(Ack::ok()))
}
