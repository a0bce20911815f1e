//! Integration tests for the checkout transaction and sale history.
//!
//! Everything runs against real SQLite (in-memory for the single-threaded
//! cases, a temp file for the concurrency case) with the embedded
//! migrations applied.

use chrono::Utc;
use uuid::Uuid;

use pos_core::{CheckoutLine, CheckoutRequest, CoreError, PaymentMethod, StockPolicy};
use pos_db::{CheckoutError, Database, DbConfig};

async fn in_memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn seed_product(db: &Database, id: &str, name: &str, price_cents: i64, stock: i64) {
    sqlx::query(
        "INSERT INTO products (id, barcode, name, cost_cents, price_cents, \
                               category_id, stock_qty, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7)",
    )
    .bind(id)
    .bind(format!("BC-{id}"))
    .bind(name)
    .bind(price_cents / 2)
    .bind(price_cents)
    .bind(stock)
    .bind(Utc::now())
    .execute(db.pool())
    .await
    .unwrap();
}

async fn stock_of(db: &Database, id: &str) -> i64 {
    sqlx::query_scalar("SELECT stock_qty FROM products WHERE id = ?1")
        .bind(id)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

fn shirt_request(qty: i64) -> CheckoutRequest {
    let subtotal = 500 * qty;
    CheckoutRequest {
        customer_name: "Asha".to_string(),
        customer_mobile: Some("5551234".to_string()),
        cashier_name: Some("cashier".to_string()),
        lines: vec![CheckoutLine {
            product_id: "p-shirt".to_string(),
            name: "Shirt".to_string(),
            unit_price_cents: 500,
            quantity: qty,
        }],
        subtotal_cents: subtotal,
        discount_cents: 0,
        total_cents: subtotal,
        payment_method: PaymentMethod::Cash,
    }
}

#[tokio::test]
async fn checkout_records_sale_and_decrements_stock() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    let receipt = db.sales().checkout(&shirt_request(2)).await.unwrap();

    assert_eq!(receipt.invoice_no, "INV000001");
    assert_eq!(stock_of(&db, "p-shirt").await, 8);

    // Customer was created and attached.
    let customer = db
        .customers()
        .find_by_phone("5551234")
        .await
        .unwrap()
        .expect("customer created by checkout");
    assert_eq!(customer.name, "Asha");

    let sale = db
        .sales()
        .get_by_id(&receipt.sale_id)
        .await
        .unwrap()
        .expect("sale persisted");
    assert_eq!(sale.customer_id.as_deref(), Some(customer.id.as_str()));
    assert_eq!(sale.total_cents, 1000);
    assert!(sale.user_id.is_some(), "seeded cashier resolved");
}

#[tokio::test]
async fn history_resolves_customer_cashier_and_items() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    let receipt = db.sales().checkout(&shirt_request(3)).await.unwrap();

    let history = db.sales().history().await.unwrap();
    assert_eq!(history.len(), 1);

    let entry = &history[0];
    assert_eq!(entry.sale.id, receipt.sale_id);
    assert_eq!(entry.sale.invoice_no, "INV000001");
    assert_eq!(entry.customer_name.as_deref(), Some("Asha"));
    assert_eq!(entry.customer_phone.as_deref(), Some("5551234"));
    assert_eq!(entry.cashier_name.as_deref(), Some("cashier"));
    assert_eq!(entry.items.len(), 1);
    assert_eq!(entry.items[0].name_snapshot, "Shirt");
    assert_eq!(entry.items[0].quantity, 3);
    assert_eq!(entry.items[0].line_total_cents, 1500);
}

#[tokio::test]
async fn history_is_newest_first() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 100).await;

    for _ in 0..3 {
        db.sales().checkout(&shirt_request(1)).await.unwrap();
    }

    let history = db.sales().history().await.unwrap();
    let invoices: Vec<&str> = history.iter().map(|e| e.sale.invoice_no.as_str()).collect();
    assert_eq!(invoices, vec!["INV000003", "INV000002", "INV000001"]);
}

#[tokio::test]
async fn invoice_numbers_are_sequential_without_gaps() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 100).await;

    for i in 1..=5 {
        let receipt = db.sales().checkout(&shirt_request(1)).await.unwrap();
        assert_eq!(receipt.invoice_no, format!("INV{i:06}"));
    }
}

#[tokio::test]
async fn unknown_product_rolls_back_everything() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    let mut req = shirt_request(1);
    req.lines.push(CheckoutLine {
        product_id: "p-ghost".to_string(),
        name: "Ghost".to_string(),
        unit_price_cents: 100,
        quantity: 1,
    });
    req.subtotal_cents = 600;
    req.total_cents = 600;

    let err = db.sales().checkout(&req).await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Rule(CoreError::ProductNotFound(ref id)) if id == "p-ghost"
    ));

    // Nothing from the aborted transaction survives.
    assert_eq!(db.sales().count().await.unwrap(), 0);
    assert_eq!(stock_of(&db, "p-shirt").await, 10);
    assert!(db.customers().find_by_phone("5551234").await.unwrap().is_none());

    // The allocated number is reused by the next successful sale.
    let receipt = db.sales().checkout(&shirt_request(1)).await.unwrap();
    assert_eq!(receipt.invoice_no, "INV000001");
}

#[tokio::test]
async fn repeat_phone_reuses_customer_and_keeps_first_name() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    db.sales().checkout(&shirt_request(1)).await.unwrap();

    let mut again = shirt_request(1);
    again.customer_name = "A. Sharma".to_string();
    db.sales().checkout(&again).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    let customer = db.customers().find_by_phone("5551234").await.unwrap().unwrap();
    assert_eq!(customer.name, "Asha", "first submitted name wins");
}

#[tokio::test]
async fn unknown_cashier_records_sale_without_user() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    let mut req = shirt_request(1);
    req.cashier_name = Some("nobody".to_string());

    let receipt = db.sales().checkout(&req).await.unwrap();
    let sale = db.sales().get_by_id(&receipt.sale_id).await.unwrap().unwrap();
    assert!(sale.user_id.is_none());
}

#[tokio::test]
async fn empty_cart_produces_sale_with_no_items() {
    let db = in_memory_db().await;

    let req = CheckoutRequest {
        customer_name: "Walk-in".to_string(),
        customer_mobile: None,
        cashier_name: None,
        lines: vec![],
        subtotal_cents: 0,
        discount_cents: 0,
        total_cents: 0,
        payment_method: PaymentMethod::Card,
    };

    let receipt = db.sales().checkout(&req).await.unwrap();
    assert_eq!(receipt.invoice_no, "INV000001");

    let history = db.sales().history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].items.is_empty());
    assert!(history[0].customer_name.is_none());
    assert!(history[0].cashier_name.is_none());
}

#[tokio::test]
async fn oversell_is_rejected_by_default() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 1).await;

    let err = db.sales().checkout(&shirt_request(2)).await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Rule(CoreError::InsufficientStock {
            available: 1,
            requested: 2,
            ..
        })
    ));
    assert_eq!(stock_of(&db, "p-shirt").await, 1);
}

#[tokio::test]
async fn allow_negative_policy_drives_stock_below_zero() {
    let config = DbConfig::in_memory().stock_policy(StockPolicy::AllowNegative);
    let db = Database::new(config).await.unwrap();
    seed_product(&db, "p-shirt", "Shirt", 500, 1).await;

    db.sales().checkout(&shirt_request(3)).await.unwrap();
    assert_eq!(stock_of(&db, "p-shirt").await, -2);
}

#[tokio::test]
async fn invalid_request_is_rejected_before_any_write() {
    let db = in_memory_db().await;
    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;

    let mut req = shirt_request(1);
    req.total_cents += 50;

    let err = db.sales().checkout(&req).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Rule(CoreError::Validation(_))));
    assert_eq!(db.sales().count().await.unwrap(), 0);

    // The counter was never touched.
    let receipt = db.sales().checkout(&shirt_request(1)).await.unwrap();
    assert_eq!(receipt.invoice_no, "INV000001");
}

#[tokio::test]
async fn counter_resyncs_from_existing_sales() {
    let db = in_memory_db().await;

    // Simulate a database imported with pre-existing sales but a fresh
    // counter row.
    sqlx::query(
        "INSERT INTO sales (id, invoice_no, user_id, customer_id, subtotal_cents, \
                            discount_cents, total_cents, payment_method, created_at) \
         VALUES (?1, 'INV000041', NULL, NULL, 0, 0, 0, 'cash', ?2)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(Utc::now())
    .execute(db.pool())
    .await
    .unwrap();

    db.sales().resync_invoice_counter().await.unwrap();

    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;
    let receipt = db.sales().checkout(&shirt_request(1)).await.unwrap();
    assert_eq!(receipt.invoice_no, "INV000042");
}

#[tokio::test]
async fn unparseable_latest_invoice_restarts_numbering() {
    let db = in_memory_db().await;

    sqlx::query(
        "INSERT INTO sales (id, invoice_no, user_id, customer_id, subtotal_cents, \
                            discount_cents, total_cents, payment_method, created_at) \
         VALUES (?1, 'LEGACY-77', NULL, NULL, 0, 0, 0, 'cash', ?2)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(Utc::now())
    .execute(db.pool())
    .await
    .unwrap();

    db.sales().resync_invoice_counter().await.unwrap();

    seed_product(&db, "p-shirt", "Shirt", 500, 10).await;
    let receipt = db.sales().checkout(&shirt_request(1)).await.unwrap();
    assert_eq!(receipt.invoice_no, "INV000001");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_get_distinct_consecutive_invoices() {
    let path = std::env::temp_dir().join(format!("pos-test-{}.db", Uuid::new_v4()));
    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    seed_product(&db, "p-shirt", "Shirt", 500, 1000).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.sales().checkout(&shirt_request(1)).await
        }));
    }

    let mut invoices = Vec::new();
    for handle in handles {
        let receipt = handle.await.unwrap().unwrap();
        invoices.push(receipt.invoice_no);
    }

    invoices.sort();
    let expected: Vec<String> = (1..=10).map(|i| format!("INV{i:06}")).collect();
    assert_eq!(invoices, expected, "no duplicates, no gaps");
    assert_eq!(stock_of(&db, "p-shirt").await, 990);

    db.close().await;
    let _ = std::fs::remove_file(&path);
}
