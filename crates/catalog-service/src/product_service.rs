//! Product service trait definition.

use crate::dto::{
    CreateProductRequest, ProductDetailResponse, ProductListResponse, ProductQuery,
    ProductResponse, UpdateProductRequest,
};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ProductId};

/// Product service trait.
///
/// Reads go through the cache (cache-aside); any mutation invalidates the
/// whole cache namespace.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Creates a new product.
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse>;

    /// Lists products matching a query, annotated with hit/miss status.
    async fn list_products(&self, query: ProductQuery) -> CatalogResult<ProductListResponse>;

    /// Gets a product by ID, annotated with hit/miss status.
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductDetailResponse>;

    /// Partially updates a product.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<ProductResponse>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()>;
}
