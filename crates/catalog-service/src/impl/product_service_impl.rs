//! Product service implementation.
//!
//! Cache-aside: list and detail reads are served from the cache when
//! present and populate it on miss; every mutation deletes the affected
//! detail key and resets the whole cache namespace.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{
    CreateProductRequest, ProductDetailResponse, ProductListPayload, ProductListResponse,
    ProductQuery, ProductResponse, UpdateProductRequest,
};
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductId, ValidateExt};
use catalog_repository::ProductRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Product service with cache-aside reads and reset-on-write invalidation.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceImpl {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            product_repository,
            cache,
            cache_ttl,
        }
    }

    /// Invalidates cached state after a mutation.
    ///
    /// Deletes the detail key for the touched product, then resets the
    /// whole namespace rather than tracking which list keys are affected.
    /// Failures are logged and swallowed: the write already succeeded.
    async fn invalidate_caches(&self, id: Option<ProductId>) {
        if let Some(id) = id {
            if let Err(e) = self.cache.delete(&cache_keys::product_by_id(id)).await {
                warn!("Failed to delete detail cache for {}: {}", id, e);
            }
        }

        match self.cache.reset_all().await {
            Ok(deleted) => debug!("Cache namespace reset, {} keys deleted", deleted),
            Err(e) => warn!("Failed to reset cache namespace: {}", e),
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let product = Product::new(
            request.name,
            request.description,
            request.price,
            request.category,
            request.stock_quantity,
            request.image_url,
        );

        let saved = self.product_repository.save(&product).await?;

        self.invalidate_caches(Some(saved.id)).await;

        info!("Product created: {}", saved.id);
        Ok(ProductResponse::from(saved))
    }

    async fn list_products(&self, query: ProductQuery) -> CatalogResult<ProductListResponse> {
        let normalized = query.normalize();
        let cache_key = cache_keys::product_list(&normalized);

        if let Some(cached) = self.cache.get::<ProductListPayload>(&cache_key).await? {
            debug!("Cache hit for product list");
            return Ok(cached.into_response(true));
        }

        let page = self.product_repository.find_by_filter(&normalized).await?;
        let payload = ProductListPayload::from(page);

        // Cache write failures are non-fatal; the value is still valid.
        if let Err(e) = self.cache.set(&cache_key, &payload, self.cache_ttl).await {
            warn!("Failed to cache product list: {}", e);
        }

        Ok(payload.into_response(false))
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductDetailResponse> {
        debug!("Getting product: {}", id);

        let cache_key = cache_keys::product_by_id(id);

        if let Some(cached) = self.cache.get::<ProductResponse>(&cache_key).await? {
            debug!("Cache hit for product: {}", id);
            return Ok(ProductDetailResponse {
                data: cached,
                cache_hit: true,
            });
        }

        let product = self
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        let response = ProductResponse::from(product);

        if let Err(e) = self.cache.set(&cache_key, &response, self.cache_ttl).await {
            warn!("Failed to cache product {}: {}", id, e);
        }

        Ok(ProductDetailResponse {
            data: response,
            cache_hit: false,
        })
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        let mut product = self
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        product.apply_update(
            request.name,
            request.description,
            request.price,
            request.category,
            request.stock_quantity,
            request.image_url,
        );

        let updated = self.product_repository.update(&product).await?;

        self.invalidate_caches(Some(id)).await;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(updated))
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        let deleted = self.product_repository.delete(id).await?;

        if !deleted {
            return Err(CatalogError::not_found("Product", id));
        }

        self.invalidate_caches(Some(id)).await;

        info!("Product deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{NormalizedQuery, Page, ProductSortField, SortOrder};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory mock repository for testing.
    struct MockProductRepository {
        products: Mutex<HashMap<ProductId, Product>>,
    }

    impl MockProductRepository {
        fn new() -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
            }
        }

        fn with_product(product: Product) -> Self {
            let repo = Self::new();
            repo.products.lock().unwrap().insert(product.id, product);
            repo
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
            Ok(self.products.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_filter(&self, query: &NormalizedQuery) -> CatalogResult<Page<Product>> {
            let products = self.products.lock().unwrap();
            let mut matching: Vec<Product> = products
                .values()
                .filter(|p| {
                    query
                        .category
                        .as_ref()
                        .map_or(true, |c| p.category.contains(c.as_str()))
                })
                .filter(|p| query.min_price.map_or(true, |min| p.price >= min))
                .filter(|p| query.max_price.map_or(true, |max| p.price <= max))
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.name.cmp(&b.name));

            let total = matching.len() as u64;
            let start = query.page.offset().min(matching.len());
            let end = (start + query.page.limit).min(matching.len());

            Ok(Page::new(
                matching[start..end].to_vec(),
                query.page.page,
                query.page.limit,
                total,
            ))
        }

        async fn save(&self, product: &Product) -> CatalogResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn update(&self, product: &Product) -> CatalogResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
            Ok(self.products.lock().unwrap().remove(&id).is_some())
        }

        async fn count(&self) -> CatalogResult<u64> {
            Ok(self.products.lock().unwrap().len() as u64)
        }
    }

    /// In-memory cache for testing. TTLs are accepted and ignored.
    struct MemoryCache {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryCache {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }
    }

    #[async_trait]
    impl CacheInterface for MemoryCache {
        async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_raw(&self, key: &str, value: &str, _ttl: Duration) -> CatalogResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CatalogResult<bool> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn reset_all(&self) -> CatalogResult<u64> {
            let mut entries = self.entries.lock().unwrap();
            let namespaced: Vec<String> = entries
                .keys()
                .filter(|k| k.starts_with(cache_keys::CACHE_PREFIX))
                .cloned()
                .collect();
            for key in &namespaced {
                entries.remove(key);
            }
            Ok(namespaced.len() as u64)
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn create_test_product(name: &str) -> Product {
        Product::new(
            name.to_string(),
            Some("A test product".to_string()),
            dec!(19.99),
            "tools".to_string(),
            5,
            None,
        )
    }

    fn create_service(
        repo: MockProductRepository,
    ) -> (ProductServiceImpl, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new());
        let service = ProductServiceImpl::new(
            Arc::new(repo),
            cache.clone(),
            Duration::from_secs(600),
        );
        (service, cache)
    }

    fn valid_create_request(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: None,
            price: dec!(9.99),
            category: "tools".to_string(),
            stock_quantity: 3,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let (service, _cache) = create_service(MockProductRepository::new());

        let response = service
            .create_product(valid_create_request("Widget"))
            .await
            .unwrap();

        assert_eq!(response.name, "Widget");
        assert_eq!(response.price, dec!(9.99));
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_price() {
        let (service, _cache) = create_service(MockProductRepository::new());

        let mut request = valid_create_request("Widget");
        request.price = dec!(0);

        let result = service.create_product(request).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_miss_then_hit() {
        let product = create_test_product("Widget");
        let product_id = product.id;
        let (service, cache) = create_service(MockProductRepository::with_product(product));

        let first = service.get_product(product_id).await.unwrap();
        assert!(!first.cache_hit);
        assert!(cache.contains(&cache_keys::product_by_id(product_id)));

        let second = service.get_product(product_id).await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_get_product_not_found_caches_nothing() {
        let (service, cache) = create_service(MockProductRepository::new());

        let missing = ProductId::new();
        let result = service.get_product(missing).await;

        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_list_products_miss_then_hit_identical_payload() {
        let repo = MockProductRepository::new();
        repo.save(&create_test_product("Widget")).await.unwrap();
        repo.save(&create_test_product("Gadget")).await.unwrap();
        let (service, _cache) = create_service(repo);

        let first = service.list_products(ProductQuery::default()).await.unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.meta.total, 2);

        let second = service.list_products(ProductQuery::default()).await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(first.data, second.data);
        assert_eq!(first.meta, second.meta);
    }

    #[tokio::test]
    async fn test_list_cache_key_respects_normalization() {
        let repo = MockProductRepository::new();
        repo.save(&create_test_product("Widget")).await.unwrap();
        let (service, _cache) = create_service(repo);

        // Inverted bounds normalize to the same query as ordered bounds,
        // so the second call must be a hit.
        let inverted = ProductQuery {
            min_price: Some(dec!(100)),
            max_price: Some(dec!(10)),
            ..Default::default()
        };
        let ordered = ProductQuery {
            min_price: Some(dec!(10)),
            max_price: Some(dec!(100)),
            ..Default::default()
        };

        let first = service.list_products(inverted).await.unwrap();
        assert!(!first.cache_hit);

        let second = service.list_products(ordered).await.unwrap();
        assert!(second.cache_hit);
    }

    #[tokio::test]
    async fn test_distinct_queries_use_distinct_keys() {
        let repo = MockProductRepository::new();
        repo.save(&create_test_product("Widget")).await.unwrap();
        let (service, _cache) = create_service(repo);

        let page_one = ProductQuery {
            page: Some(1),
            ..Default::default()
        };
        let page_two = ProductQuery {
            page: Some(2),
            ..Default::default()
        };

        assert!(!service.list_products(page_one).await.unwrap().cache_hit);
        assert!(!service.list_products(page_two).await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_update_flushes_cache_so_reads_are_fresh() {
        let product = create_test_product("Widget");
        let product_id = product.id;
        let (service, _cache) = create_service(MockProductRepository::with_product(product));

        // Populate both detail and list caches.
        service.get_product(product_id).await.unwrap();
        service.list_products(ProductQuery::default()).await.unwrap();

        let request = UpdateProductRequest {
            name: Some("Widget v2".to_string()),
            ..Default::default()
        };
        service.update_product(product_id, request).await.unwrap();

        // Post-flush reads miss the cache and observe the new state.
        let detail = service.get_product(product_id).await.unwrap();
        assert!(!detail.cache_hit);
        assert_eq!(detail.data.name, "Widget v2");

        let list = service.list_products(ProductQuery::default()).await.unwrap();
        assert!(!list.cache_hit);
        assert_eq!(list.data[0].name, "Widget v2");
    }

    #[tokio::test]
    async fn test_create_flushes_entire_namespace() {
        let repo = MockProductRepository::new();
        repo.save(&create_test_product("Widget")).await.unwrap();
        let (service, cache) = create_service(repo);

        // Warm several list keys and a detail key.
        service.list_products(ProductQuery::default()).await.unwrap();
        service
            .list_products(ProductQuery {
                category: Some("tools".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(cache.len() >= 2);

        service
            .create_product(valid_create_request("Gadget"))
            .await
            .unwrap();

        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let (service, _cache) = create_service(MockProductRepository::new());

        let result = service
            .update_product(ProductId::new(), UpdateProductRequest::default())
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_product_flushes_and_missing_id_errors() {
        let product = create_test_product("Widget");
        let product_id = product.id;
        let (service, cache) = create_service(MockProductRepository::with_product(product));

        service.get_product(product_id).await.unwrap();
        assert!(cache.len() > 0);

        service.delete_product(product_id).await.unwrap();
        assert_eq!(cache.len(), 0);

        let result = service.delete_product(product_id).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));

        let read = service.get_product(product_id).await;
        assert!(matches!(read, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_applies_sort_and_limit_clamps() {
        let repo = MockProductRepository::new();
        for i in 0..3 {
            repo.save(&create_test_product(&format!("P{}", i)))
                .await
                .unwrap();
        }
        let (service, _cache) = create_service(repo);

        let response = service
            .list_products(ProductQuery {
                page: Some(0),
                limit: Some(1000),
                sort_by: Some(ProductSortField::Name),
                order: Some(SortOrder::Asc),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.meta.page, 1);
        assert_eq!(response.meta.limit, 100);
        assert_eq!(response.meta.total, 3);
    }
}
