//! Route definitions for bid submission.

use axum::routing::post;
use axum::Router;

use crate::handlers::bids;
use crate::state::AppState;

/// ```text
/// POST /bids -> submit_bid (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/bids", post(bids::submit_bid))
}
