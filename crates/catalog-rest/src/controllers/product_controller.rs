//! Product management controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{CatalogError, ProductId};
use catalog_service::{
    CreateProductRequest, ProductDetailResponse, ProductListResponse, ProductQuery,
    ProductResponse, UpdateProductRequest,
};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// List products matching the query.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Product list with cache-hit annotation", body = ProductListResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<ProductListResponse> {
    debug!("List products request");

    let response = state.product_service.list_products(query).await?;
    ok(response)
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    debug!("Create product request: {}", request.name);

    let response = state.product_service.create_product(request).await?;
    Ok(created(response))
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with cache-hit annotation", body = ProductDetailResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductDetailResponse> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let response = state.product_service.get_product(product_id).await?;
    ok(response)
}

/// Partially update a product.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let response = state
        .product_service
        .update_product(product_id, request)
        .await?;
    ok(response)
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    let product_id = parse_product_id(&id)?;
    state.product_service.delete_product(product_id).await?;

    Ok(no_content())
}

/// Helper to parse a product ID from a path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id)
        .map_err(|_| AppError(CatalogError::Validation(format!("Invalid product ID: {}", id))))
}
