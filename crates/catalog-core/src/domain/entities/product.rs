//! Product entity.

use crate::{Entity, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity representing a catalog item.
///
/// Invariants: `price` is positive with at most two decimal places,
/// `stock_quantity` is non-negative (by type). Both are enforced at the
/// DTO boundary before a product is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: ProductId,

    /// Product display name.
    pub name: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Unit price, two-decimal scale.
    pub price: Decimal,

    /// Product category.
    pub category: String,

    /// Units in stock.
    pub stock_quantity: u32,

    /// Optional product image URL.
    pub image_url: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with the given details.
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        price: Decimal,
        category: String,
        stock_quantity: u32,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            description,
            price,
            category,
            stock_quantity,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the product has units in stock.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Applies a partial update. Fields left as `None` are unchanged.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        category: Option<String>,
        stock_quantity: Option<u32>,
        image_url: Option<String>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(stock_quantity) = stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(image_url) = image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
    }

    /// Adjusts the stock level.
    pub fn set_stock(&mut self, quantity: u32) {
        self.stock_quantity = quantity;
        self.updated_at = Utc::now();
    }
}

impl Entity<ProductId> for Product {
    fn id(&self) -> &ProductId {
        &self.id
    }
}
