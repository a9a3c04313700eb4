use crate::traits::{Catalog, CatalogError, CatalogResult};
use async_trait::async_trait;
use mediabin_core::MediaRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory catalog implementation.
///
/// The default backend when no database is configured; also the backend the
/// integration tests run against.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    by_media_id: HashMap<String, MediaRecord>,
    insertion_order: Vec<String>,
    next_id: i64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn save(&self, media_id: &str, content_type: &str) -> CatalogResult<i64> {
        let mut inner = self.inner.write().await;
        if inner.by_media_id.contains_key(media_id) {
            return Err(CatalogError::DuplicateMediaId(media_id.to_string()));
        }
        inner.next_id += 1;
        let record = MediaRecord {
            id: inner.next_id,
            media_id: media_id.to_string(),
            content_type: content_type.to_string(),
        };
        inner.by_media_id.insert(media_id.to_string(), record);
        inner.insertion_order.push(media_id.to_string());
        tracing::info!(media_id, content_type, "Media file record stored");
        Ok(inner.next_id)
    }

    async fn find_by_media_id(&self, media_id: &str) -> CatalogResult<Option<MediaRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.by_media_id.get(media_id).cloned())
    }

    async fn list_media_ids(&self) -> CatalogResult<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner.insertion_order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_assigns_monotonic_ids() {
        let catalog = MemoryCatalog::new();
        let first = catalog.save("id-one", "audio/mpeg").await.unwrap();
        let second = catalog.save("id-two", "image/png").await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn find_returns_stored_record() {
        let catalog = MemoryCatalog::new();
        catalog.save("id-one", "application/pdf").await.unwrap();

        let record = catalog.find_by_media_id("id-one").await.unwrap().unwrap();
        assert_eq!(record.media_id, "id-one");
        assert_eq!(record.content_type, "application/pdf");

        assert!(catalog.find_by_media_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let catalog = MemoryCatalog::new();
        for id in ["c", "a", "b"] {
            catalog.save(id, "video/mp4").await.unwrap();
        }
        assert_eq!(catalog.list_media_ids().await.unwrap(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn duplicate_media_id_is_rejected() {
        let catalog = MemoryCatalog::new();
        catalog.save("dup", "image/jpeg").await.unwrap();
        assert!(matches!(
            catalog.save("dup", "image/jpeg").await,
            Err(CatalogError::DuplicateMediaId(_))
        ));
    }
}
