use serde::{Deserialize, Serialize};

/// Catalog entry for a stored media file.
///
/// Created once at ingestion completion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Internal monotonically assigned primary key.
    pub id: i64,
    /// Public identifier embedded in the media URL, a.k.a. the `m` query parameter.
    pub media_id: String,
    /// Resolved content type of the media file, for example `audio/mpeg`.
    pub content_type: String,
}
