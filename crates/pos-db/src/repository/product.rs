//! # Product Repository
//!
//! Inventory CRUD. The client speaks in category *names*, so product
//! writes resolve (find-or-create) the category inside their own
//! transaction. Stock decrements on sale do NOT go through here - they are
//! part of the checkout transaction in [`super::sale`].

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::category::find_or_create_category;
use pos_core::Product;

/// Fields accepted by product create/update. Monetary values in cents.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub barcode: String,
    pub name: String,
    /// Category name; resolved find-or-create. None leaves the product
    /// uncategorized.
    pub category: Option<String>,
    pub cost_cents: i64,
    pub price_cents: i64,
    pub stock_qty: i64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A product joined with its category name for listing.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products with their category names, newest first.
    pub async fn list(&self) -> DbResult<Vec<ProductWithCategory>> {
        let products = sqlx::query_as::<_, ProductWithCategory>(
            "SELECT p.id, p.barcode, p.name, p.cost_cents, p.price_cents, \
                    p.category_id, p.stock_qty, p.brand, p.size, p.color, \
                    p.created_at, c.name AS category_name \
             FROM products p \
             LEFT JOIN categories c ON p.category_id = c.id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, barcode, name, cost_cents, price_cents, category_id, \
                    stock_qty, brand, size, color, created_at \
             FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product, resolving the category name in the same
    /// transaction.
    pub async fn insert(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(barcode = %input.barcode, name = %input.name, "Inserting product");

        let mut tx = self.pool.begin().await?;

        let category_id = match input.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Some(find_or_create_category(&mut tx, name).await?)
            }
            _ => None,
        };

        let product = Product {
            id: Uuid::new_v4().to_string(),
            barcode: input.barcode.clone(),
            name: input.name.clone(),
            cost_cents: input.cost_cents,
            price_cents: input.price_cents,
            category_id,
            stock_qty: input.stock_qty,
            brand: input.brand.clone(),
            size: input.size.clone(),
            color: input.color.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO products (id, barcode, name, cost_cents, price_cents, \
                                   category_id, stock_qty, brand, size, color, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&product.id)
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(product.cost_cents)
        .bind(product.price_cents)
        .bind(&product.category_id)
        .bind(product.stock_qty)
        .bind(&product.brand)
        .bind(&product.size)
        .bind(&product.color)
        .bind(product.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Updates an existing product, resolving the category name in the
    /// same transaction.
    pub async fn update(&self, id: &str, input: &ProductInput) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let mut tx = self.pool.begin().await?;

        let category_id = match input.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Some(find_or_create_category(&mut tx, name).await?)
            }
            _ => None,
        };

        let result = sqlx::query(
            "UPDATE products SET \
                barcode = ?2, name = ?3, cost_cents = ?4, price_cents = ?5, \
                category_id = ?6, stock_qty = ?7, brand = ?8, size = ?9, color = ?10 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.barcode)
        .bind(&input.name)
        .bind(input.cost_cents)
        .bind(input.price_cents)
        .bind(&category_id)
        .bind(input.stock_qty)
        .bind(&input.brand)
        .bind(&input.size)
        .bind(&input.color)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Deletes a product. Hard delete, as in the source system; sale
    /// history is safe because sale items snapshot name and price.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
