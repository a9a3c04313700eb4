//! mediabin HTTP API.
//!
//! Upload flow: `POST /api` runs the ingestion pipeline (checksum gate,
//! content sniffing, allow-list, catalog + blob write) and returns a public
//! media URL. Retrieval flow: `GET /media?m=<id>` dispatches to a
//! type-specific viewer page and mints a short-lived single-use token; the
//! viewer fetches the bytes from `GET /view/content`, resolving the token
//! through the access token cache.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod viewer;
