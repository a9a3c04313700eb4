//! Core types shared across the mediabin crates: configuration, the unified
//! error type, domain models, public identifier generation, and media URL
//! construction/parsing.

pub mod config;
pub mod error;
pub mod media_id;
pub mod media_url;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media_url::MediaUrls;
pub use models::MediaRecord;
