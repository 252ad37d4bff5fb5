//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use crate::controllers::health_controller::{HealthChecks, HealthResponse};
use catalog_core::{ErrorResponse, FieldError, ProductId, ProductSortField, SortOrder};
use catalog_service::{
    CreateProductRequest, PageMeta, ProductDetailResponse, ProductListPayload,
    ProductListResponse, ProductResponse, UpdateProductRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Product catalog CRUD service with a cache-aside layer",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Health endpoints
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            // Core types
            ProductId,
            ProductSortField,
            SortOrder,
            ErrorResponse,
            FieldError,
            // Product DTOs
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductListPayload,
            ProductListResponse,
            ProductDetailResponse,
            PageMeta,
            // Health
            HealthResponse,
            HealthChecks,
        )
    ),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
