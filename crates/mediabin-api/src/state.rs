use std::sync::Arc;

use mediabin_catalog::Catalog;
use mediabin_core::Config;
use mediabin_storage::BlobStore;

use crate::services::MediaIngestService;
use crate::viewer::TokenCache;

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<dyn Catalog>,
    pub blobs: Arc<dyn BlobStore>,
    pub ingest: MediaIngestService,
    pub token_cache: Arc<TokenCache>,
}
