//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, NormalizedQuery, Page, Product, ProductId};

/// Product repository trait.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Finds products matching a normalized query, with the total count.
    async fn find_by_filter(&self, query: &NormalizedQuery) -> CatalogResult<Page<Product>>;

    /// Saves a new product.
    async fn save(&self, product: &Product) -> CatalogResult<Product>;

    /// Updates an existing product.
    async fn update(&self, product: &Product) -> CatalogResult<Product>;

    /// Deletes a product by ID.
    async fn delete(&self, id: ProductId) -> CatalogResult<bool>;

    /// Counts all products.
    async fn count(&self) -> CatalogResult<u64>;
}
