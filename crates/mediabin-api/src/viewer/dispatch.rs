//! Viewer dispatch endpoint.
//!
//! `GET /media?m=<id>` looks up the media file, mints a single-use access
//! token, sets it as a cookie, and renders the viewer page matching the
//! stored content type. Failures render generic error pages so the endpoint
//! leaks nothing about which identifiers exist.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use mediabin_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::pages;
use crate::error::log_error;
use crate::state::AppState;

/// Cookie carrying the viewer access token.
pub const TOKEN_COOKIE_NAME: &str = "media-token";

/// Viewer page variant, derived from the stored content type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ViewKind {
    Image,
    Audio,
    Video,
    Document,
}

impl ViewKind {
    fn for_content_type(content_type: &str) -> Option<ViewKind> {
        match content_type {
            "image/jpeg" | "image/png" => Some(ViewKind::Image),
            "audio/mpeg" => Some(ViewKind::Audio),
            "video/mp4" => Some(ViewKind::Video),
            "application/pdf" => Some(ViewKind::Document),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub struct DispatchParams {
    m: Option<String>,
}

#[tracing::instrument(skip(state, params), fields(operation = "dispatch_media"))]
pub async fn dispatch_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DispatchParams>,
) -> Response {
    match forward(&state, params.m.as_deref()).await {
        Ok(response) => response,
        Err(error) => viewer_error_response(&error),
    }
}

async fn forward(state: &AppState, media_id: Option<&str>) -> Result<Response, AppError> {
    let media_id = match media_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return Err(AppError::InvalidInput(
                "Missing media id parameter".to_string(),
            ))
        }
    };

    let record = state
        .catalog
        .find_by_media_id(media_id)
        .await
        .map_err(crate::error::catalog_error)?
        .ok_or_else(|| {
            AppError::NotFound(format!("Media file not found or empty: {}", media_id))
        })?;

    let view = ViewKind::for_content_type(&record.content_type).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "No viewer for content type: {}",
            record.content_type
        ))
    })?;

    let token = Uuid::new_v4().to_string();
    state.token_cache.put(&token, media_id);

    tracing::info!(media_id, view = ?view, "Dispatching media viewer");

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=None; Secure",
        TOKEN_COOKIE_NAME, token
    );
    let mut response = Html(pages::viewer_page(view)).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(response)
}

/// Error page for the viewer surface. Unlike the API surface this returns
/// HTML, collapsing every failure into two generic pages.
pub(super) fn viewer_error_response(error: &AppError) -> Response {
    log_error(error);
    match error {
        AppError::NotFound(_) | AppError::InvalidInput(_) => {
            (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::general_error_page()),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_kind_covers_supported_types() {
        assert_eq!(
            ViewKind::for_content_type("image/jpeg"),
            Some(ViewKind::Image)
        );
        assert_eq!(
            ViewKind::for_content_type("image/png"),
            Some(ViewKind::Image)
        );
        assert_eq!(
            ViewKind::for_content_type("audio/mpeg"),
            Some(ViewKind::Audio)
        );
        assert_eq!(
            ViewKind::for_content_type("video/mp4"),
            Some(ViewKind::Video)
        );
        assert_eq!(
            ViewKind::for_content_type("application/pdf"),
            Some(ViewKind::Document)
        );
    }

    #[test]
    fn unknown_content_type_has_no_view() {
        assert_eq!(ViewKind::for_content_type("video/quicktime"), None);
        assert_eq!(ViewKind::for_content_type("text/plain"), None);
    }
}
