//! Public media identifier generation.
//!
//! Identifiers are random UUIDs (128 bits of entropy) encoded as unpadded
//! base64url, which yields a fixed 22-character string. Uniqueness relies on
//! the entropy of the identifier; the catalog is not consulted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use uuid::Uuid;

/// Length of the public media identifier embedded in media URLs.
pub const MEDIA_ID_LENGTH: usize = 22;

/// Generate a fresh public identifier.
pub fn generate() -> String {
    let uuid = Uuid::new_v4();
    URL_SAFE_NO_PAD.encode(uuid.as_bytes())
}
