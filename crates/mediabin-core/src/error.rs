//! Error types module
//!
//! All domain errors are unified under the `AppError` enum. Each variant
//! self-describes its HTTP presentation through the `ErrorMetadata` trait so
//! the API crate can render responses without matching on variants twice.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CHECKSUM_MISMATCH")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Media file checksum mismatch")]
    ChecksumMismatch,

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Error detecting content type: {message}")]
    ContentDetection {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Static metadata per variant: (http_status, error_code, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::ChecksumMismatch => (400, "CHECKSUM_MISMATCH", LogLevel::Warn),
        AppError::UnsupportedContentType(_) => (400, "UNSUPPORTED_CONTENT_TYPE", LogLevel::Warn),
        AppError::ContentDetection { .. } => (400, "CONTENT_DETECTION_ERROR", LogLevel::Warn),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_REQUEST", LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        // Never leak internal causes: failure detail is logged server-side only.
        match self {
            AppError::NotFound(_) => "Media file not found".to_string(),
            AppError::InvalidInput(_) => "Invalid request".to_string(),
            _ => "Media file request cannot be processed".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
