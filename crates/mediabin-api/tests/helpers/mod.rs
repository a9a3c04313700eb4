//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mediabin-api`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use mediabin_api::services::MediaIngestService;
use mediabin_api::setup::build_router;
use mediabin_api::state::AppState;
use mediabin_api::viewer::TokenCache;
use mediabin_catalog::{Catalog, MemoryCatalog};
use mediabin_core::{Config, MediaUrls};
use mediabin_storage::{BlobStore, LocalBlobStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_BASE_URL: &str = "http://localhost:8080";

/// Test application: server, shared state, and owned storage directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

/// Setup test app with an in-memory catalog and temp-dir blob storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let config = Config {
        server_port: 8080,
        public_base_url: TEST_BASE_URL.to_string(),
        storage_path: temp_dir.path().join("media"),
        max_upload_bytes: 10 * 1024 * 1024,
        token_ttl: Duration::from_secs(5),
        token_sweep_interval: Duration::from_secs(1),
        database_url: None,
    };

    let catalog: Arc<dyn Catalog> = Arc::new(MemoryCatalog::new());
    let blobs: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::new(config.storage_path.clone())
            .await
            .expect("Failed to create local storage"),
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

    let server =
        TestServer::new(build_router(state.clone())).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// POST a media file with its checksum description.
pub async fn upload_media(
    server: &TestServer,
    bytes: &[u8],
    file_name: &str,
    checksum: &str,
) -> TestResponse {
    let form = MultipartForm::new()
        .add_part("media", Part::bytes(bytes.to_vec()).file_name(file_name))
        .add_text(
            "description",
            serde_json::json!({ "checksum": checksum }).to_string(),
        );
    server.post("/api").multipart(form).await
}

/// Extract the media identifier from a public URL returned by the upload
/// endpoint.
pub fn media_id_of(url: &str) -> String {
    MediaUrls::new(TEST_BASE_URL)
        .media_id_from_url(url)
        .expect("upload response is not a media URL")
}

/// Extract the viewer access token from a dispatch response's Set-Cookie
/// header.
pub fn token_cookie_of(response: &TestResponse) -> String {
    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("missing Set-Cookie header")
        .to_str()
        .expect("Set-Cookie is not valid UTF-8")
        .to_string();
    cookie
        .strip_prefix("media-token=")
        .and_then(|rest| rest.split(';').next())
        .expect("Set-Cookie does not carry a media token")
        .to_string()
}
