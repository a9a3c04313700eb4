//! Media blob store collaborator boundary.
//!
//! Durable storage for media file bytes, keyed by the public media
//! identifier. Keys must not contain `..` or a leading `/`; the local backend
//! validates this before touching the filesystem.

pub mod local;
pub mod traits;

pub use local::LocalBlobStore;
pub use traits::{BlobStore, ByteStream, StorageError, StorageResult};
