//! Application wiring: state construction, routing, server lifecycle.

mod routes;
mod server;

pub use routes::build_router;
pub use server::start_server;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use mediabin_catalog::{Catalog, MemoryCatalog};
use mediabin_core::{Config, MediaUrls};
use mediabin_storage::{BlobStore, LocalBlobStore};

use crate::services::MediaIngestService;
use crate::state::AppState;
use crate::viewer::TokenCache;

/// Build the shared state and router from configuration.
pub async fn initialize_app(config: Config) -> anyhow::Result<(Arc<AppState>, Router)> {
    let catalog = build_catalog(&config).await?;

    let blobs: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::new(config.storage_path.clone())
            .await
            .context("Failed to initialize blob store")?,
    );

    let media_urls = MediaUrls::new(&config.public_base_url);
    let ingest = MediaIngestService::new(catalog.clone(), blobs.clone(), media_urls);
    let token_cache = TokenCache::start(config.token_ttl, config.token_sweep_interval);

    let state = Arc::new(AppState {
        config,
        catalog,
        blobs,
        ingest,
        token_cache,
    });

    let router = build_router(state.clone());
    Ok((state, router))
}

#[cfg(feature = "catalog-postgres")]
async fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn Catalog>> {
    match &config.database_url {
        Some(url) => {
            let catalog = mediabin_catalog::PostgresCatalog::connect(url)
                .await
                .context("Failed to connect to catalog database")?;
            tracing::info!("Using Postgres catalog");
            Ok(Arc::new(catalog))
        }
        None => {
            tracing::info!("Using in-memory catalog");
            Ok(Arc::new(MemoryCatalog::new()))
        }
    }
}

#[cfg(not(feature = "catalog-postgres"))]
async fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn Catalog>> {
    if config.database_url.is_some() {
        tracing::warn!(
            "DATABASE_URL is set but this build has no Postgres support, using in-memory catalog"
        );
    } else {
        tracing::info!("Using in-memory catalog");
    }
    Ok(Arc::new(MemoryCatalog::new()))
}
