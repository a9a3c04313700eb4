//! HTTP error response conversion and domain error mapping.
//!
//! `HttpAppError` wraps `AppError` to implement `IntoResponse` (orphan rule:
//! we cannot implement the axum trait for the core type directly). The body
//! is always generic; the full cause is logged server-side only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mediabin_catalog::CatalogError;
use mediabin_core::{AppError, ErrorMetadata, LogLevel};
use mediabin_detect::DetectError;
use mediabin_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

pub(crate) fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = error.error_code(), "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = error.error_code(), "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        log_error(app_error);

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

// Domain error conversions into the unified AppError.

pub(crate) fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(key),
        StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
        other => AppError::Storage(other.to_string()),
    }
}

pub(crate) fn catalog_error(err: CatalogError) -> AppError {
    // DuplicateMediaId is an implementation bug, not a transient condition;
    // it surfaces as a fatal storage error and is never retried.
    AppError::Storage(err.to_string())
}

pub(crate) fn detection_error(err: DetectError) -> AppError {
    AppError::ContentDetection {
        message: "Error detecting content type".to_string(),
        source: anyhow::Error::new(err),
    }
}
