//! File integrity and content type detection.
//!
//! This crate owns the two ingestion gates that look at file bytes:
//! checksum computation ([`checksum`]) and content type sniffing ([`sniff`]).
//! Sniffing is content-based: the client-supplied file name is only a hint
//! for signatures the magic-byte pass cannot resolve, never the authority.
//!
//! All functions here do blocking file I/O; async callers are expected to run
//! them on a blocking task.

pub mod bmff;
pub mod checksum;
pub mod sniff;

use std::path::PathBuf;

/// Errors raised while reading or parsing a media file.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Container parse error: {0}")]
    Parse(String),
}

impl DetectError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DetectError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
