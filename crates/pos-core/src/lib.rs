//! # pos-core: Pure Business Logic for Shopfront POS
//!
//! This crate is the heart of the POS backend. It contains the business
//! rules of the sale/checkout path as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Shopfront POS Architecture                      │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                  Browser client (billing UI)                │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │ REST (JSON)                        │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │                  apps/server (axum handlers)                │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │               ★ pos-core (THIS CRATE) ★                     │    │
//! │  │                                                             │    │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌───────────┐   │    │
//! │  │   │  types   │  │  money   │  │ invoice  │  │ checkout  │   │    │
//! │  │   │ Product  │  │  Money   │  │ format / │  │  request  │   │    │
//! │  │   │  Sale    │  │  cents   │  │  parse   │  │ validate  │   │    │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └───────────┘   │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │                  pos-db (SQLite repositories)               │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Customer, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`invoice`] - Sequential invoice number formatting and parsing
//! - [`checkout`] - Checkout request types and validation
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutLine, CheckoutRequest, StockPolicy};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item in a checkout.
///
/// Guards against fat-finger entry (typing 1000 instead of 10). Can be made
/// configurable per shop later.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum number of line items in a single checkout.
pub const MAX_CHECKOUT_LINES: usize = 100;
