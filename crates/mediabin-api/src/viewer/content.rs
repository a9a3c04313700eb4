//! Streamed media content endpoint.
//!
//! The viewer page fetches its bytes here. The media identifier comes from
//! the `m` query parameter when present, otherwise from the single-use
//! access token in the request cookie. Token resolution consumes the token.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, Response},
    response::IntoResponse,
};
use mediabin_core::AppError;
use serde::Deserialize;
use std::sync::Arc;

use super::dispatch::viewer_error_response;
use crate::error::{catalog_error, storage_error};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContentParams {
    m: Option<String>,
}

#[tracing::instrument(skip_all, fields(operation = "media_content"))]
pub async fn media_content(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContentParams>,
    headers: HeaderMap,
) -> axum::response::Response {
    match stream_content(&state, params.m.as_deref(), &headers).await {
        Ok(response) => response,
        Err(error) => viewer_error_response(&error),
    }
}

async fn stream_content(
    state: &AppState,
    media_id_param: Option<&str>,
    headers: &HeaderMap,
) -> Result<axum::response::Response, AppError> {
    let media_id = match media_id_param {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => {
            let token = cookie_token(headers).ok_or_else(|| {
                AppError::InvalidInput("Missing media id and access token".to_string())
            })?;
            state.token_cache.resolve(&token).ok_or_else(|| {
                AppError::InvalidInput("Unknown or expired access token".to_string())
            })?
        }
    };

    let record = state
        .catalog
        .find_by_media_id(&media_id)
        .await
        .map_err(catalog_error)?
        .ok_or_else(|| {
            AppError::NotFound(format!("Media file not found or empty: {}", media_id))
        })?;

    let size = state.blobs.size(&media_id).await.map_err(storage_error)?;
    let stream = state.blobs.get(&media_id).await.map_err(storage_error)?;

    tracing::info!(
        media_id,
        content_type = record.content_type,
        size_bytes = size,
        "Streaming media content"
    );

    Response::builder()
        .header(header::CONTENT_TYPE, record.content_type)
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map(IntoResponse::into_response)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}

// TOKEN_COOKIE_NAME followed by '='.
const TOKEN_COOKIE_PREFIX: &str = "media-token=";

/// Extract the access token from the request's `Cookie` headers.
pub(super) fn cookie_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some(token) = pair.trim().strip_prefix(TOKEN_COOKIE_PREFIX) {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::TOKEN_COOKIE_NAME;
    use axum::http::HeaderValue;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn token_is_extracted_from_cookie() {
        let headers = headers_with("media-token=abc123");
        assert_eq!(cookie_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let headers = headers_with("session=xyz; media-token=abc123; theme=dark");
        assert_eq!(cookie_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        assert_eq!(cookie_token(&HeaderMap::new()), None);
        assert_eq!(cookie_token(&headers_with("session=xyz")), None);
        assert_eq!(cookie_token(&headers_with("media-token=")), None);
    }

    #[test]
    fn cookie_prefix_matches_cookie_name() {
        assert_eq!(TOKEN_COOKIE_PREFIX, format!("{}=", TOKEN_COOKIE_NAME));
    }
}
