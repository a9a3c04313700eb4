mod ingest;

pub use ingest::{MediaIngestService, SUPPORTED_CONTENT_TYPES};
