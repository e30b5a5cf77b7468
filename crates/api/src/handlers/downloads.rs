//! Handler for `GET /track/download`.

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use stocklot_core::catalogue;
use stocklot_core::records::{write_timestamp, DownloadRecord};
use stocklot_store::Table;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::middleware::client_meta::ClientMeta;
use crate::state::AppState;

/// Query parameters for `GET /track/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    pub catalogue: String,
}

/// GET /track/download?catalogue=slug
///
/// Requires a session. Appends one Downloads row and redirects to the
/// catalogue file. Unknown slugs and catalogues without a downloadable
/// file are not found; nothing is recorded for them.
pub async fn track_download(
    SessionUser(identity): SessionUser,
    State(state): State<AppState>,
    meta: ClientMeta,
    Query(params): Query<DownloadParams>,
) -> AppResult<impl IntoResponse> {
    let catalogue =
        catalogue::by_slug(&params.catalogue).ok_or(AppError::NotFound("Catalogue"))?;
    let file_url = catalogue.file_url.ok_or(AppError::NotFound("Catalogue"))?;

    let record = DownloadRecord {
        timestamp: write_timestamp(),
        participant_id: identity.participant_id.clone(),
        email: identity.email,
        catalogue_slug: catalogue.slug.to_string(),
        catalogue_title: catalogue.title.to_string(),
        client_ip: meta.ip,
        user_agent: meta.user_agent,
    };

    state.store.append(Table::Downloads, record.into_row()).await?;

    tracing::info!(
        participant_id = %identity.participant_id,
        catalogue = catalogue.slug,
        "Download recorded"
    );

    Ok((StatusCode::FOUND, [(LOCATION, file_url)]))
}
