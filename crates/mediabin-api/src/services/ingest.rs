//! Media ingestion pipeline.
//!
//! Every uploaded file passes the same gate sequence before it becomes
//! publicly addressable: checksum verification, content type sniffing,
//! allow-list check, catalog record, blob write. A failure at any gate
//! leaves no publicly visible media behind, with one documented exception:
//! the catalog row is written before the blob, so a blob write failure can
//! leave a dangling row. That row is never listed as retrievable content
//! because retrieval requires the blob; the failure is logged with the
//! orphaned identifier for manual cleanup.

use std::path::Path;
use std::sync::Arc;

use mediabin_catalog::Catalog;
use mediabin_core::{AppError, MediaUrls};
use mediabin_detect::{checksum, sniff};
use mediabin_storage::BlobStore;

use crate::error::{catalog_error, detection_error, storage_error};

/// Content types accepted for ingestion.
pub const SUPPORTED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "audio/mpeg",
    "application/pdf",
    "video/mp4",
];

/// Runs the ingestion pipeline and serves the public URL listing.
#[derive(Clone)]
pub struct MediaIngestService {
    catalog: Arc<dyn Catalog>,
    blobs: Arc<dyn BlobStore>,
    media_urls: MediaUrls,
}

impl MediaIngestService {
    pub fn new(catalog: Arc<dyn Catalog>, blobs: Arc<dyn BlobStore>, media_urls: MediaUrls) -> Self {
        MediaIngestService {
            catalog,
            blobs,
            media_urls,
        }
    }

    /// Ingest the upload at `path` and return its public URL.
    ///
    /// `original_name` is the client-supplied file name, used only as a
    /// low-trust hint during content sniffing. `declared_checksum` must be
    /// the lowercase hex SHA-256 of the file bytes, compared by exact string
    /// equality.
    pub async fn ingest(
        &self,
        path: &Path,
        original_name: &str,
        declared_checksum: &str,
    ) -> Result<String, AppError> {
        let actual_checksum = run_blocking({
            let path = path.to_path_buf();
            move || checksum::sha256_hex(&path)
        })
        .await?
        .map_err(detection_error)?;

        if actual_checksum != declared_checksum {
            tracing::error!(
                original_name,
                declared_checksum,
                actual_checksum,
                "Media file checksum error"
            );
            return Err(AppError::ChecksumMismatch);
        }

        let content_type = run_blocking({
            let path = path.to_path_buf();
            let original_name = original_name.to_string();
            move || sniff::content_type(&path, &original_name)
        })
        .await?
        .map_err(detection_error)?;

        if !SUPPORTED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::UnsupportedContentType(content_type));
        }

        let url = self.media_urls.create_url();
        let media_id = self.media_urls.media_id_from_url(&url)?;

        tracing::info!(media_id, content_type, "Storing media file");

        self.catalog
            .save(&media_id, &content_type)
            .await
            .map_err(catalog_error)?;

        if let Err(e) = self.blobs.put(path, &media_id, &content_type).await {
            tracing::error!(
                media_id,
                error = %e,
                "Blob write failed after catalog insert, catalog row is dangling"
            );
            return Err(storage_error(e));
        }

        Ok(url)
    }

    /// Public URLs of every stored media file, in insertion order.
    pub async fn list_public_urls(&self) -> Result<Vec<String>, AppError> {
        let ids = self.catalog.list_media_ids().await.map_err(catalog_error)?;
        Ok(ids.iter().map(|id| self.media_urls.url_for(id)).collect())
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))
}
