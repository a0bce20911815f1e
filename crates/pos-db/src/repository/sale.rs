//! # Sale Repository
//!
//! The checkout transaction and the sale history reader.
//!
//! Checkout is the one multi-statement unit of work in the system. Every
//! step runs on a single transaction and any failure rolls the whole sale
//! back:
//!
//! ```text
//! BEGIN
//!   1. bump invoice_counter (takes the write lock, serializing checkouts)
//!   2. find-or-create customer by phone        (optional)
//!   3. resolve cashier username to user id     (best effort)
//!   4. stock check per line                    (policy dependent)
//!   5. insert sale header
//!   6. insert sale items + decrement stock
//! COMMIT
//! ```
//!
//! Step 1 runs FIRST so the transaction starts as a writer. A deferred
//! transaction that read before writing could hit SQLITE_BUSY on lock
//! upgrade under concurrency; bumping the counter up front makes the
//! busy_timeout apply at BEGIN-equivalent time and hands out invoice
//! numbers in strict allocation order.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pos_core::invoice::{format_invoice_no, sequence_after};
use pos_core::{CheckoutRequest, CoreError, Sale, SaleItem, StockPolicy};

/// What checkout hands back on success.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub sale_id: String,
    pub invoice_no: String,
}

/// Checkout failure. Rule violations (unknown product, oversell) are kept
/// apart from infrastructure faults so callers can map them to client
/// errors versus server errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Rule(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(DbError::from(err))
    }
}

/// One sale with its customer, cashier and line items resolved, as the
/// history endpoint presents it.
#[derive(Debug, Clone)]
pub struct SaleHistoryEntry {
    pub sale: Sale,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub cashier_name: Option<String>,
    pub items: Vec<SaleItem>,
}

/// Flat row shape for the history header query.
#[derive(Debug, FromRow)]
struct SaleHeaderRow {
    #[sqlx(flatten)]
    sale: Sale,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    cashier_name: Option<String>,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
    stock_policy: StockPolicy,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool, stock_policy: StockPolicy) -> Self {
        SaleRepository { pool, stock_policy }
    }

    /// Records a sale atomically. See the module docs for the step order.
    ///
    /// The request must already have passed
    /// [`CheckoutRequest::validate`]; this method re-runs it anyway so the
    /// repository cannot be driven into an inconsistent write by a caller
    /// that skipped validation.
    pub async fn checkout(&self, req: &CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        req.validate().map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;

        // 1. Allocate the invoice number. First statement on purpose.
        let seq: i64 = sqlx::query_scalar(
            "UPDATE invoice_counter SET last_seq = last_seq + 1 WHERE id = 1 RETURNING last_seq",
        )
        .fetch_one(&mut *tx)
        .await?;
        let invoice_no = format_invoice_no(seq);

        // 2. Customer, keyed by phone. No phone, no customer record.
        let customer_id = match req.customer_phone() {
            Some(phone) => Some(
                super::customer::find_or_create_customer(&mut tx, &req.customer_name, phone)
                    .await?,
            ),
            None => None,
        };

        // 3. Cashier, best effort. An unknown username is not an error.
        let user_id = match req.cashier() {
            Some(username) => super::user::resolve_user_id(&mut tx, username).await?,
            None => None,
        };

        // 4. Stock check. Every referenced product must exist; whether an
        // oversell aborts depends on the configured policy.
        for line in &req.lines {
            let stock: Option<i64> =
                sqlx::query_scalar("SELECT stock_qty FROM products WHERE id = ?1")
                    .bind(&line.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            let available = stock
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            if self.stock_policy == StockPolicy::RejectOversell && available < line.quantity {
                return Err(CheckoutError::Rule(CoreError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    available,
                    requested: line.quantity,
                }));
            }
        }

        // 5. Sale header.
        let sale_id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        sqlx::query(
            "INSERT INTO sales (id, invoice_no, user_id, customer_id, subtotal_cents, \
                                discount_cents, total_cents, payment_method, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&sale_id)
        .bind(&invoice_no)
        .bind(&user_id)
        .bind(&customer_id)
        .bind(req.subtotal_cents)
        .bind(req.discount_cents)
        .bind(req.total_cents)
        .bind(req.payment_method)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        // 6. Line items with name/price snapshots, stock decremented as we go.
        for line in &req.lines {
            sqlx::query(
                "INSERT INTO sale_items (id, sale_id, product_id, name_snapshot, \
                                         unit_price_cents, quantity, line_total_cents, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale_id)
            .bind(&line.product_id)
            .bind(&line.name)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .bind(line.line_total().cents())
            .bind(created_at)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE products SET stock_qty = stock_qty - ?2 WHERE id = ?1")
                .bind(&line.product_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            sale_id = %sale_id,
            invoice_no = %invoice_no,
            lines = req.lines.len(),
            total_cents = req.total_cents,
            "Sale recorded"
        );

        Ok(CheckoutReceipt { sale_id, invoice_no })
    }

    /// Returns all sales, newest first, with customer, cashier and line
    /// items resolved.
    ///
    /// Two queries total regardless of sale count: one for the headers
    /// (joined against customers and users) and one batched IN-list fetch
    /// for every sale's items.
    pub async fn history(&self) -> DbResult<Vec<SaleHistoryEntry>> {
        let headers = sqlx::query_as::<_, SaleHeaderRow>(
            "SELECT s.id, s.invoice_no, s.user_id, s.customer_id, s.subtotal_cents, \
                    s.discount_cents, s.total_cents, s.payment_method, s.created_at, \
                    c.name AS customer_name, c.phone AS customer_phone, \
                    u.username AS cashier_name \
             FROM sales s \
             LEFT JOIN customers c ON s.customer_id = c.id \
             LEFT JOIN users u ON s.user_id = u.id \
             ORDER BY s.created_at DESC, s.rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, sale_id, product_id, name_snapshot, unit_price_cents, \
                    quantity, line_total_cents, created_at \
             FROM sale_items WHERE sale_id IN (",
        );
        let mut separated = builder.separated(", ");
        for header in &headers {
            separated.push_bind(&header.sale.id);
        }
        separated.push_unseparated(") ORDER BY rowid");

        let items = builder
            .build_query_as::<SaleItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
        for item in items {
            by_sale.entry(item.sale_id.clone()).or_default().push(item);
        }

        let entries = headers
            .into_iter()
            .map(|row| {
                let items = by_sale.remove(&row.sale.id).unwrap_or_default();
                SaleHistoryEntry {
                    sale: row.sale,
                    customer_name: row.customer_name,
                    customer_phone: row.customer_phone,
                    cashier_name: row.cashier_name,
                    items,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, invoice_no, user_id, customer_id, subtotal_cents, discount_cents, \
                    total_cents, payment_method, created_at \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Brings the invoice counter up to at least the sequence implied by
    /// the most recently inserted sale. Runs at startup so a database
    /// imported from the legacy system (which had no counter row) resumes
    /// numbering instead of colliding with existing invoices.
    ///
    /// An unparseable latest invoice restarts numbering at 1; the UNIQUE
    /// constraint on sales.invoice_no backstops any collision that could
    /// still arise from hand-edited data.
    pub async fn resync_invoice_counter(&self) -> DbResult<()> {
        let latest: Option<String> =
            sqlx::query_scalar("SELECT invoice_no FROM sales ORDER BY rowid DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        let next = sequence_after(latest.as_deref());
        let floor = next - 1;

        sqlx::query("UPDATE invoice_counter SET last_seq = MAX(last_seq, ?1) WHERE id = 1")
            .bind(floor)
            .execute(&self.pool)
            .await?;

        debug!(floor = floor, "Invoice counter synced");

        Ok(())
    }
}
