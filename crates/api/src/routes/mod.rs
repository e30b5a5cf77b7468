pub mod bids;
pub mod downloads;
pub mod health;
pub mod register;

use axum::Router;

use crate::state::AppState;

/// Build the submission route tree.
///
/// ```text
/// POST /register        -> register (public, sets session cookie)
/// POST /bids            -> submit_bid (requires session)
/// GET  /track/download  -> track_download (requires session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(register::router())
        .merge(bids::router())
        .merge(downloads::router())
}
