//! Postgres product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, NormalizedQuery, Page, Product, ProductId,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shaku::Component;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct PgProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgProductRepository {
    /// Creates a new Postgres product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: String,
    stock_quantity: i32,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock_quantity = u32::try_from(row.stock_quantity).map_err(|_| {
            CatalogError::Internal(format!(
                "Negative stock quantity in database for product {}",
                row.id
            ))
        })?;

        Ok(Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            stock_quantity,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, name, description, price, category, stock_quantity, \
                              image_url, created_at, updated_at";

/// Appends the WHERE clause for a normalized query.
fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a NormalizedQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR category ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category) = &query.category {
        builder
            .push(" AND category ILIKE ")
            .push_bind(format!("%{}%", category));
    }

    if let Some(min_price) = query.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }

    if let Some(max_price) = query.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, category, stock_quantity,
                   image_url, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_by_filter(&self, query: &NormalizedQuery) -> CatalogResult<Page<Product>> {
        debug!(
            "Finding products, page: {}, limit: {}, sort: {} {}",
            query.page.page, query.page.limit, query.sort_by, query.order
        );

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count_builder, query);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut select_builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM products", SELECT_COLUMNS));
        push_filters(&mut select_builder, query);

        // Sort column and direction come from allow-list enums, never raw input.
        select_builder
            .push(" ORDER BY ")
            .push(query.sort_by.column())
            .push(" ")
            .push(query.order.sql())
            .push(" LIMIT ")
            .push_bind(query.page.limit as i64)
            .push(" OFFSET ")
            .push_bind(query.page.offset() as i64);

        let rows: Vec<ProductRow> = select_builder
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let products: Vec<Product> = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(
            products,
            query.page.page,
            query.page.limit,
            total as u64,
        ))
    }

    async fn save(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Saving product: {}", product.id);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, stock_quantity,
                                  image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.stock_quantity as i32)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Updating product: {}", product.id);

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, category = $5,
                stock_quantity = $6, image_url = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.stock_quantity as i32)
        .bind(&product.image_url)
        .bind(product.updated_at)
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Product", product.id));
        }

        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> CatalogResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(total as u64)
    }
}

impl std::fmt::Debug for PgProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductRepository").finish_non_exhaustive()
    }
}
