//! # Error Types
//!
//! Domain-specific error types for pos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  pos-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  pos-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  HTTP errors (apps/server)                                          │
//! │  └── ApiError         - What the client sees (serialized)           │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → client    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives, never manual impls
//! 2. Include context in messages (barcode, id, quantities)
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the checkout path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A checkout line references a product id that does not exist.
    ///
    /// The legacy system silently inserted the line and let the stock
    /// update affect zero rows; that latent inconsistency is rejected
    /// here and the whole transaction aborts.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds available stock and the configured
    /// stock policy forbids overselling.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any transaction is opened.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A computed amount does not fit in 64-bit cents.
    #[error("{field} exceeds the representable amount")]
    AmountOverflow { field: String },

    /// The submitted totals do not agree with each other.
    #[error("total must equal subtotal minus discount (clamped at 0): expected {expected}, got {got}")]
    InconsistentTotal { expected: i64, got: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
