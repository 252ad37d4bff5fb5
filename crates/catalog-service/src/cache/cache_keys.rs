//! Cache key generators for consistent key naming.
//!
//! List keys encode the canonical form of a normalized query with a fixed
//! field order, absent filters rendered as empty strings. Equal normalized
//! queries therefore always produce equal keys.

use catalog_core::{NormalizedQuery, ProductId};

/// Prefix for all cache keys to namespace them.
pub const CACHE_PREFIX: &str = "catalog:cache";

/// Generate a cache key for a product by ID.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("{}:product:{}", CACHE_PREFIX, id)
}

/// Generate a cache key for a product list query.
#[must_use]
pub fn product_list(query: &NormalizedQuery) -> String {
    let search = query.search.as_deref().unwrap_or("");
    let category = query.category.as_deref().unwrap_or("");
    let min_price = query
        .min_price
        .map(|p| p.to_string())
        .unwrap_or_default();
    let max_price = query
        .max_price
        .map(|p| p.to_string())
        .unwrap_or_default();

    format!(
        "{}:products:list:search={}&category={}&minPrice={}&maxPrice={}&page={}&limit={}&sortBy={}&order={}",
        CACHE_PREFIX,
        search,
        category,
        min_price,
        max_price,
        query.page.page,
        query.page.limit,
        query.sort_by,
        query.order,
    )
}

/// Pattern matching every key in the cache namespace.
#[must_use]
pub fn namespace_pattern() -> String {
    format!("{}:*", CACHE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{PageRequest, ProductSortField, SortOrder};
    use rust_decimal::Decimal;

    #[test]
    fn test_product_by_id_key() {
        let id = ProductId::new();
        let key = product_by_id(id);
        assert!(key.starts_with("catalog:cache:product:"));
        assert!(key.contains(&id.to_string()));
    }

    #[test]
    fn test_equal_queries_produce_equal_keys() {
        let a = NormalizedQuery {
            search: Some("laser".to_string()),
            category: None,
            min_price: Some(Decimal::new(1000, 2)),
            max_price: None,
            page: PageRequest::new(2, 25),
            sort_by: ProductSortField::Price,
            order: SortOrder::Asc,
        };
        let b = a.clone();

        assert_eq!(product_list(&a), product_list(&b));
    }

    #[test]
    fn test_different_pages_produce_different_keys() {
        let mut a = NormalizedQuery::default();
        let mut b = NormalizedQuery::default();
        a.page = PageRequest::new(1, 10);
        b.page = PageRequest::new(2, 10);

        assert_ne!(product_list(&a), product_list(&b));
    }

    #[test]
    fn test_absent_filters_encode_as_empty() {
        let key = product_list(&NormalizedQuery::default());
        assert!(key.contains("search=&category=&minPrice=&maxPrice="));
        assert!(key.contains("sortBy=createdAt&order=DESC"));
    }

    #[test]
    fn test_list_keys_live_in_namespace() {
        let key = product_list(&NormalizedQuery::default());
        assert!(key.starts_with(CACHE_PREFIX));
        assert!(namespace_pattern().starts_with(CACHE_PREFIX));
    }
}
