//! Product-related DTOs.

use catalog_core::validation::rules;
use catalog_core::{Page, Product, ProductId, ProductSortField, SortOrder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = rules::not_blank)
    )]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(
        function = rules::valid_price,
        message = "Price must be positive with at most two decimals"
    ))]
    pub price: Decimal,

    #[validate(
        length(min = 1, max = 100, message = "Category must be 1-100 characters"),
        custom(function = rules::not_blank)
    )]
    pub category: String,

    pub stock_quantity: u32,

    #[validate(url(message = "Invalid image URL"), length(max = 500))]
    pub image_url: Option<String>,
}

/// Request to partially update a product. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(
        function = rules::valid_price,
        message = "Price must be positive with at most two decimals"
    ))]
    pub price: Option<Decimal>,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    pub stock_quantity: Option<u32>,

    #[validate(url(message = "Invalid image URL"), length(max = 500))]
    pub image_url: Option<String>,
}

/// Raw list query parameters as they arrive over HTTP.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// Free-text search over name, category, and description.
    pub search: Option<String>,
    /// Category filter.
    pub category: Option<String>,
    /// Lower price bound.
    pub min_price: Option<Decimal>,
    /// Upper price bound.
    pub max_price: Option<Decimal>,
    /// 1-indexed page number.
    pub page: Option<usize>,
    /// Page size, clamped to [1, 100].
    pub limit: Option<usize>,
    /// Sort field (allow-listed).
    pub sort_by: Option<ProductSortField>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

/// Product response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock_quantity: product.stock_quantity,
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub total: u64,
    pub page: usize,
    pub limit: usize,
}

/// The cacheable part of a list response (no hit/miss annotation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListPayload {
    pub data: Vec<ProductResponse>,
    pub meta: PageMeta,
}

impl From<Page<Product>> for ProductListPayload {
    fn from(page: Page<Product>) -> Self {
        let meta = PageMeta {
            total: page.info.total_elements,
            page: page.info.page,
            limit: page.info.limit,
        };
        Self {
            data: page.into_iter().map(ProductResponse::from).collect(),
            meta,
        }
    }
}

impl ProductListPayload {
    /// Annotates the payload with its cache-hit status.
    #[must_use]
    pub fn into_response(self, cache_hit: bool) -> ProductListResponse {
        ProductListResponse {
            data: self.data,
            meta: self.meta,
            cache_hit,
        }
    }
}

/// Product list response with hit/miss annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub data: Vec<ProductResponse>,
    pub meta: PageMeta,
    pub cache_hit: bool,
}

/// Product detail response with hit/miss annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub data: ProductResponse,
    pub cache_hit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use validator::Validate;

    fn valid_create_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price: dec!(19.99),
            category: "tools".to_string(),
            stock_quantity: 5,
            image_url: Some("https://example.com/widget.png".to_string()),
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_blank_name() {
        let mut request = valid_create_request();
        request.name = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_non_positive_price() {
        let mut request = valid_create_request();
        request.price = dec!(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_sub_cent_price() {
        let mut request = valid_create_request();
        request.price = dec!(9.999);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_invalid_image_url() {
        let mut request = valid_create_request();
        request.image_url = Some("not a url".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_empty_is_valid() {
        assert!(UpdateProductRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_request_bad_price() {
        let request = UpdateProductRequest {
            price: Some(dec!(-5)),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_product_query_camel_case_wire_format() {
        let query: ProductQuery = serde_json::from_str(
            r#"{"search":"laser","minPrice":"5.00","sortBy":"updatedAt","order":"ASC"}"#,
        )
        .unwrap();

        assert_eq!(query.search.as_deref(), Some("laser"));
        assert_eq!(query.min_price, Some(dec!(5.00)));
        assert_eq!(query.sort_by, Some(ProductSortField::UpdatedAt));
        assert_eq!(query.order, Some(SortOrder::Asc));
    }

    #[test]
    fn test_list_payload_from_page() {
        let products = vec![
            Product::new("A".into(), None, dec!(1.00), "misc".into(), 1, None),
            Product::new("B".into(), None, dec!(2.00), "misc".into(), 2, None),
        ];
        let page = Page::new(products, 1, 10, 2);
        let payload = ProductListPayload::from(page);

        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.meta.total, 2);
        assert_eq!(payload.meta.page, 1);

        let response = payload.into_response(true);
        assert!(response.cache_hit);
    }

    #[test]
    fn test_response_serializes_cache_hit_camel_case() {
        let product = Product::new("A".into(), None, dec!(1.00), "misc".into(), 1, None);
        let response = ProductDetailResponse {
            data: product.into(),
            cache_hit: false,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"cacheHit\":false"));
        assert!(json.contains("\"stockQuantity\""));
    }
}
