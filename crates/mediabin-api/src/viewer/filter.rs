//! Request filter guarding the viewer content route.
//!
//! A content request must carry either a non-blank `m` query parameter or a
//! currently cached access token. The filter only checks token presence;
//! consuming the token is left to the handler so the check stays
//! non-mutating.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::content::cookie_token;
use super::pages;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FilterParams {
    m: Option<String>,
}

pub async fn media_request_filter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
    request: Request,
    next: Next,
) -> Response {
    let has_media_id = params
        .m
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());

    if !has_media_id {
        let token_ok = cookie_token(request.headers())
            .is_some_and(|token| state.token_cache.is_valid(&token));
        if !token_ok {
            tracing::warn!("Content request without media id or valid token");
            return (StatusCode::BAD_REQUEST, Html(pages::general_error_page()))
                .into_response();
        }
    }

    next.run(request).await
}
