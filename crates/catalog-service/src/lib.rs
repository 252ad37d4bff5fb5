//! # Catalog Service
//!
//! Business logic service layer for the catalog service. Contains the
//! cache-aside product service, query normalization, and DTOs.

pub mod cache;
pub mod dto;
pub mod normalize;
pub mod product_service;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::*;
