//! Media upload endpoint.
//!
//! `POST /api` takes a multipart form with a `media` file part and a
//! `description` part carrying `{"checksum": "<sha256 hex>"}`. Success
//! returns `201 Created` with the public URL as the body. Every failure is
//! a bare `400 Bad Request`: the upload surface does not differentiate
//! failure causes for the client.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediabin_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::state::AppState;

const MEDIA_PART_NAME: &str = "media";
const DESCRIPTION_PART_NAME: &str = "description";

#[derive(Debug, Deserialize)]
struct MediaFileDescription {
    checksum: String,
}

struct UploadParts {
    file: NamedTempFile,
    original_name: String,
    description: MediaFileDescription,
}

#[tracing::instrument(skip(state, multipart), fields(operation = "create_media_file"))]
pub async fn create_media_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    match process_upload(&state, multipart).await {
        Ok(url) => (StatusCode::CREATED, url).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Error storing media file");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

async fn process_upload(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let parts = read_parts(multipart).await?;

    if parts.description.checksum.trim().is_empty() {
        return Err(AppError::InvalidInput("Blank checksum".to_string()));
    }

    state
        .ingest
        .ingest(
            parts.file.path(),
            &parts.original_name,
            &parts.description.checksum,
        )
        .await
}

async fn read_parts(mut multipart: Multipart) -> Result<UploadParts, AppError> {
    let mut file = None;
    let mut original_name = None;
    let mut description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some(MEDIA_PART_NAME) => {
                let name = field.file_name().unwrap_or("unnamed").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read media part: {}", e)))?;
                file = Some(write_temp_file(bytes).await?);
                original_name = Some(name);
            }
            Some(DESCRIPTION_PART_NAME) => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read description part: {}", e))
                })?;
                description = Some(serde_json::from_str::<MediaFileDescription>(&text).map_err(
                    |e| AppError::InvalidInput(format!("Malformed description: {}", e)),
                )?);
            }
            _ => {}
        }
    }

    Ok(UploadParts {
        file: file.ok_or_else(|| AppError::InvalidInput("Missing media part".to_string()))?,
        original_name: original_name
            .ok_or_else(|| AppError::InvalidInput("Missing media part".to_string()))?,
        description: description
            .ok_or_else(|| AppError::InvalidInput("Missing description part".to_string()))?,
    })
}

/// Spool the uploaded bytes to a request-scoped temporary file. The file is
/// deleted on drop, when the request terminates.
async fn write_temp_file(bytes: bytes::Bytes) -> Result<NamedTempFile, AppError> {
    tokio::task::spawn_blocking(move || {
        use std::io::Write;
        let mut file = NamedTempFile::new()?;
        file.write_all(&bytes)?;
        file.flush()?;
        Ok::<_, std::io::Error>(file)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
    .map_err(AppError::from)
}
