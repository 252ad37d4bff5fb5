//! Normalized product query types.
//!
//! A [`NormalizedQuery`] is the canonical form of a product list query:
//! filters trimmed, price bounds ordered, page and limit clamped, sort
//! restricted to an allow-list. Normalization is deterministic, so equal
//! raw queries always produce equal normalized queries (and therefore
//! equal cache keys).

use crate::PageRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Fields a product listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum ProductSortField {
    Name,
    Price,
    Category,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ProductSortField {
    /// Returns the database column backing this sort field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "category",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl Display for ProductSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "category",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        };
        write!(f, "{}", name)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SortOrder {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[default]
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql())
    }
}

/// A normalized product list query.
///
/// Construction goes through the service-layer normalization step; the
/// fields here are already trimmed, ordered, and clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    /// Free-text search over name, category, and description.
    pub search: Option<String>,
    /// Category filter.
    pub category: Option<String>,
    /// Lower price bound (inclusive).
    pub min_price: Option<Decimal>,
    /// Upper price bound (inclusive).
    pub max_price: Option<Decimal>,
    /// Page and limit, clamped.
    pub page: PageRequest,
    /// Sort field from the allow-list.
    pub sort_by: ProductSortField,
    /// Sort direction.
    pub order: SortOrder,
}

impl Default for NormalizedQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            page: PageRequest::default(),
            sort_by: ProductSortField::default(),
            order: SortOrder::default(),
        }
    }
}
