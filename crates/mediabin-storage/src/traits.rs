//! Blob store abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;

/// Storage operation errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Streamed blob content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Durable storage for media file bytes.
///
/// Backends are keyed by the public media identifier; the ingestion pipeline
/// guarantees key uniqueness, so `put` never observes an overwrite in normal
/// operation.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Copy the file at `local_path` into permanent storage under `key`,
    /// tagged with `content_type`.
    ///
    /// The source is the request-scoped upload file, deleted when the request
    /// terminates.
    async fn put(&self, local_path: &Path, key: &str, content_type: &str) -> StorageResult<()>;

    /// Stream the bytes stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<ByteStream>;

    /// Size in bytes of the blob stored under `key`.
    async fn size(&self, key: &str) -> StorageResult<u64>;
}
