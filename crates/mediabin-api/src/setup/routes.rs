use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{create_media_file, list_media_files};
use crate::state::AppState;
use crate::viewer::{dispatch_media, media_content, media_request_filter};

pub fn build_router(state: Arc<AppState>) -> Router {
    let content_routes = Router::new()
        .route("/view/content", get(media_content))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            media_request_filter,
        ));

    Router::new()
        .route("/api", get(list_media_files).post(create_media_file))
        .route("/media", get(dispatch_media))
        .merge(content_routes)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
