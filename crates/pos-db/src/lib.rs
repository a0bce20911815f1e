//! # pos-db: Database Layer for Shopfront POS
//!
//! SQLite storage for the POS backend, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront POS Data Flow                        │
//! │                                                                     │
//! │  axum handler (POST /api/sales)                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                     pos-db (THIS CRATE)                     │    │
//! │  │                                                             │    │
//! │  │   ┌─────────────┐   ┌───────────────┐   ┌──────────────┐    │    │
//! │  │   │  Database   │   │ Repositories  │   │  Migrations  │    │    │
//! │  │   │  (pool.rs)  │◄──│ sale, product │   │  (embedded)  │    │    │
//! │  │   │             │   │ category, ... │   │              │    │    │
//! │  │   └─────────────┘   └───────────────┘   └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database (WAL mode)                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations; the checkout transaction
//!   lives in [`repository::sale`]

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::product::{ProductInput, ProductRepository, ProductWithCategory};
pub use repository::sale::{CheckoutError, CheckoutReceipt, SaleHistoryEntry, SaleRepository};
pub use repository::user::UserRepository;
