//! Product query normalization.
//!
//! Raw HTTP query parameters are normalized into a canonical
//! [`NormalizedQuery`] before cache key generation and repository access:
//! text filters are trimmed, inverted price bounds are swapped, page and
//! limit are clamped, and sort fields come from an allow-list.

use crate::dto::ProductQuery;
use catalog_core::{NormalizedQuery, PageRequest};
use rust_decimal::Decimal;

impl ProductQuery {
    /// Normalizes the raw query into its canonical form.
    ///
    /// Deterministic: equal raw queries always normalize to equal values.
    #[must_use]
    pub fn normalize(&self) -> NormalizedQuery {
        let search = normalize_text(self.search.as_deref());
        let category = normalize_text(self.category.as_deref());

        let mut min_price = self.min_price.map(normalize_price);
        let mut max_price = self.max_price.map(normalize_price);

        // Auto-swap inverted bounds rather than rejecting them.
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if max < min {
                std::mem::swap(&mut min_price, &mut max_price);
            }
        }

        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
        );

        NormalizedQuery {
            search,
            category,
            min_price,
            max_price,
            page,
            sort_by: self.sort_by.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
        }
    }
}

/// Trims a text filter; empty-after-trim becomes absent.
fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Strips trailing zeros so equal prices render identically in cache keys.
fn normalize_price(price: Decimal) -> Decimal {
    price.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ProductSortField, SortOrder};
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_applied() {
        let normalized = ProductQuery::default().normalize();

        assert_eq!(normalized.page.page, 1);
        assert_eq!(normalized.page.limit, PageRequest::DEFAULT_LIMIT);
        assert_eq!(normalized.sort_by, ProductSortField::CreatedAt);
        assert_eq!(normalized.order, SortOrder::Desc);
        assert!(normalized.search.is_none());
    }

    #[test]
    fn test_inverted_price_bounds_are_swapped() {
        let query = ProductQuery {
            min_price: Some(dec!(100)),
            max_price: Some(dec!(10)),
            ..Default::default()
        };

        let normalized = query.normalize();
        assert_eq!(normalized.min_price, Some(dec!(10)));
        assert_eq!(normalized.max_price, Some(dec!(100)));
    }

    #[test]
    fn test_ordered_price_bounds_are_kept() {
        let query = ProductQuery {
            min_price: Some(dec!(10)),
            max_price: Some(dec!(100)),
            ..Default::default()
        };

        let normalized = query.normalize();
        assert_eq!(normalized.min_price, Some(dec!(10)));
        assert_eq!(normalized.max_price, Some(dec!(100)));
    }

    #[test]
    fn test_trailing_zeros_do_not_change_normal_form() {
        let a = ProductQuery {
            min_price: Some(dec!(10.50)),
            ..Default::default()
        };
        let b = ProductQuery {
            min_price: Some(dec!(10.5)),
            ..Default::default()
        };

        assert_eq!(a.normalize(), b.normalize());
    }

    #[test]
    fn test_search_and_category_trimmed() {
        let query = ProductQuery {
            search: Some("  laser  ".to_string()),
            category: Some("   ".to_string()),
            ..Default::default()
        };

        let normalized = query.normalize();
        assert_eq!(normalized.search.as_deref(), Some("laser"));
        assert!(normalized.category.is_none());
    }

    #[test]
    fn test_page_and_limit_clamped() {
        let query = ProductQuery {
            page: Some(0),
            limit: Some(1000),
            ..Default::default()
        };

        let normalized = query.normalize();
        assert_eq!(normalized.page.page, 1);
        assert_eq!(normalized.page.limit, 100);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let query = ProductQuery {
            search: Some("widget".to_string()),
            category: Some("tools".to_string()),
            min_price: Some(dec!(5.00)),
            max_price: Some(dec!(1.00)),
            page: Some(3),
            limit: Some(25),
            sort_by: Some(ProductSortField::Price),
            order: Some(SortOrder::Asc),
        };

        assert_eq!(query.normalize(), query.clone().normalize());
    }
}
