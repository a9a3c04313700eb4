use async_trait::async_trait;
use mediabin_core::MediaRecord;

/// Catalog operation errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Uniqueness violation on the public identifier. Identifier entropy makes
    /// this statistically impossible; hitting it indicates an implementation
    /// bug, so callers treat it as fatal and never retry.
    #[error("Duplicate media id: {0}")]
    DuplicateMediaId(String),

    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Persistent mapping from public media identifier to content type.
///
/// Records are created once at ingestion completion and never mutated.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Store a new media file record. The file is assumed to be already
    /// validated (checksum verified, content type resolved).
    ///
    /// Returns the internal sequence id of the new record.
    async fn save(&self, media_id: &str, content_type: &str) -> CatalogResult<i64>;

    /// Look up a media file by its public identifier.
    async fn find_by_media_id(&self, media_id: &str) -> CatalogResult<Option<MediaRecord>>;

    /// All public identifiers, in insertion order.
    async fn list_media_ids(&self) -> CatalogResult<Vec<String>>;
}
