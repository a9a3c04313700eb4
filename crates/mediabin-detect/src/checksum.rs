//! SHA-256 checksum of uploaded files.

use crate::DetectError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Compute the SHA-256 digest of the file at `path`, hex-encoded lowercase.
pub fn sha256_hex(path: &Path) -> Result<String, DetectError> {
    let file = File::open(path).map_err(|e| DetectError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    std::io::copy(&mut reader, &mut hasher).map_err(|e| DetectError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}
