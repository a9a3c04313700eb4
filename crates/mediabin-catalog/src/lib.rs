//! Media catalog collaborator boundary.
//!
//! The catalog persists the mapping from public media identifier to content
//! type. It is treated as an already-safe external service: implementations
//! bring their own consistency discipline.

mod memory;
#[cfg(feature = "catalog-postgres")]
mod postgres;
mod traits;

pub use memory::MemoryCatalog;
#[cfg(feature = "catalog-postgres")]
pub use postgres::PostgresCatalog;
pub use traits::{Catalog, CatalogError, CatalogResult};
