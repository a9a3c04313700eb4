//! Media listing endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::state::AppState;

/// `GET /api` returns the public URL of every stored media file, in
/// insertion order.
#[tracing::instrument(skip(state), fields(operation = "list_media_files"))]
pub async fn list_media_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, HttpAppError> {
    let urls = state.ingest.list_public_urls().await?;
    Ok(Json(urls))
}
