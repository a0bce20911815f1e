//! # Domain Types
//!
//! Core domain types for the POS backend.
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - a business key where one exists (barcode, invoice number, username,
//!   customer phone) - human-readable, looked up by exact match
//!
//! Sale and SaleItem are immutable once created; SaleItem carries a frozen
//! snapshot of the product name and unit price so invoice history survives
//! later product edits and deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Cashier,
}

/// Actions gated by role. Evaluated server-side per request, never trusted
/// from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create/update/delete products and categories.
    ManageCatalog,
    /// Record sales at the till.
    RecordSale,
}

impl Role {
    /// Checks whether this role is allowed to perform `capability`.
    pub fn permits(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCatalog => matches!(self, Role::Manager),
            Capability::RecordSale => true,
        }
    }

    /// Wire representation, matching the database CHECK constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Cashier => "cashier",
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account (cashier or manager). Read-only from the checkout's
/// perspective; resolved by username to attach to a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
    /// Plain text, matching the legacy schema. Credential handling is a
    /// placeholder by design; see DESIGN.md.
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record, created implicitly during checkout when an unseen
/// phone number is submitted. Phone is the lookup key but the schema does
/// not enforce uniqueness; lookups take the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Created implicitly by product writes when the named
/// category does not exist (find-or-create).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Barcode - the business key used at the till. Not enforced unique.
    pub barcode: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Cost price in cents (for margin reporting).
    pub cost_cents: i64,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Category reference (nullable).
    pub category_id: Option<String>,

    /// Current stock level. Whether this may go negative is governed by
    /// [`crate::checkout::StockPolicy`].
    pub stock_qty: i64,

    /// Optional descriptive attributes.
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale (invoice header). Immutable once created.
///
/// `invoice_no` is the sequential human-facing identifier (INV000001, ...);
/// `id` is the internal relation key. Cashier and customer references are
/// nullable: resolution misses are not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub invoice_no: String,
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale. Snapshot pattern: name and unit price are frozen
/// at time of sale and never re-read from the product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    /// Product reference at time of sale. Deliberately not a foreign key:
    /// history must survive product deletion.
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_can_manage_catalog() {
        assert!(Role::Manager.permits(Capability::ManageCatalog));
        assert!(Role::Manager.permits(Capability::RecordSale));
    }

    #[test]
    fn cashier_cannot_manage_catalog() {
        assert!(!Role::Cashier.permits(Capability::ManageCatalog));
        assert!(Role::Cashier.permits(Capability::RecordSale));
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(PaymentMethod::Cash.as_str(), "cash");
        assert_eq!(PaymentMethod::Card.as_str(), "card");
        let parsed: PaymentMethod = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Card);
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::Manager.as_str(), "manager");
        let parsed: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(parsed, Role::Cashier);
    }
}
