//! Dependency injection module using Shaku.

use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabasePool, DatabasePoolParameters, PgProductRepository};
use catalog_service::{
    ProductServiceImpl, ProductServiceImplParameters, RedisCacheService,
    RedisCacheServiceParameters,
};
use shaku::module;
use std::sync::Arc;

// Application module with all components for a single-process deployment:
// - Database pool and product repository
// - Caching (Redis)
// - Product service (cache-aside)
module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            PgProductRepository,
            RedisCacheService,
            ProductServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the application module with all dependencies.
pub async fn build_module(config: &AppConfig) -> CatalogResult<Arc<CatalogModule>> {
    // Create database pool (async operation)
    let db_pool = DatabasePool::connect(&config.database).await?;

    // Create Redis cache pool (if enabled)
    let cache_pool = if config.redis.enabled {
        let redis_cfg = deadpool_redis::Config::from_url(&config.redis.url);
        let pool = redis_cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| CatalogError::Cache(format!("Failed to create Redis pool: {}", e)))?;
        Some(Arc::new(pool))
    } else {
        None
    };

    let module = CatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<ProductServiceImpl>(ProductServiceImplParameters {
            cache_ttl: config.redis.ttl(),
        })
        .build();

    Ok(Arc::new(module))
}
