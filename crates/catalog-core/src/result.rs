//! Result type aliases for the catalog service.

use crate::CatalogError;

/// A specialized `Result` type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
