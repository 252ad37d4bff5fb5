//! # Catalog Repository
//!
//! Data access layer for the catalog service:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>   (domain interface)
//! PgProductRepository               (Postgres / SQLx implementation)
//!   ↓
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
