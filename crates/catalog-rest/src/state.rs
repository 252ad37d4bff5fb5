//! Application state for Axum handlers.

use catalog_repository::DatabasePoolInterface;
use catalog_service::{CacheInterface, ProductService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub db_pool: Arc<dyn DatabasePoolInterface>,
    pub cache: Arc<dyn CacheInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        db_pool: Arc<dyn DatabasePoolInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            product_service,
            db_pool,
            cache,
        }
    }

    /// Creates application state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn ProductService>
            + HasComponent<dyn DatabasePoolInterface>
            + HasComponent<dyn CacheInterface>,
    {
        Self {
            product_service: module.resolve(),
            db_pool: module.resolve(),
            cache: module.resolve(),
        }
    }
}
