use crate::traits::{BlobStore, ByteStream, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem blob store.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new store rooted at `base_path`, creating the directory if
    /// needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        Ok(LocalBlobStore { base_path })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that could
    /// escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, local_path: &Path, key: &str, content_type: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let size = fs::copy(local_path, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                local_path.display(),
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            key,
            content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob store upload successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let stream = tokio_util::io::ReaderStream::new(file).map(|result| {
            result.map_err(|e| StorageError::DownloadFailed(format!("Failed to read chunk: {}", e)))
        });

        tracing::info!(key, "Blob store download started");

        Ok(Box::pin(stream))
    }

    async fn size(&self, key: &str) -> StorageResult<u64> {
        let path = self.key_to_path(key)?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::BackendError(e.to_string())
            }
        })?;
        Ok(meta.len())
    }
}
