//! # Customer Repository
//!
//! Customer lookup and creation. Customers only ever come into existence
//! through checkout's find-or-create by phone number; there is no customer
//! management UI.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pos_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Finds a customer by exact phone match. First match wins; phone is
    /// treated as unique but the schema does not enforce it.
    pub async fn find_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, created_at FROM customers WHERE phone = ?1 LIMIT 1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}

/// Resolves a phone number to a customer id, creating the record when the
/// phone is unseen.
///
/// On reuse the stored name is NOT updated even if the submitted name
/// differs - deliberate no-op carried over from the source system; the
/// first name given for a phone number wins.
///
/// Runs on a bare connection so checkout can call it inside its
/// transaction.
pub(crate) async fn find_or_create_customer(
    conn: &mut SqliteConnection,
    name: &str,
    phone: &str,
) -> DbResult<String> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT id FROM customers WHERE phone = ?1 LIMIT 1")
            .bind(phone)
            .fetch_optional(&mut *conn)
            .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        phone: phone.to_string(),
        created_at: Utc::now(),
    };

    debug!(phone = %customer.phone, id = %customer.id, "Creating customer");

    sqlx::query("INSERT INTO customers (id, name, phone, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&mut *conn)
        .await?;

    Ok(customer.id)
}
