//! # Checkout Request
//!
//! The fully-formed request the checkout transaction consumes, and the
//! validation that gates it.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       CheckoutRequest                               │
//! │                                                                     │
//! │  customer_name / customer_mobile ──► customer find-or-create       │
//! │  cashier_name                    ──► user lookup (best effort)     │
//! │  lines[]                         ──► sale_items + stock decrement  │
//! │  subtotal / discount / total     ──► sale header (caller-computed) │
//! │  payment_method                  ──► sale header                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit prices are taken from the request, not re-read from the catalog at
//! transaction time: the receipt must record what the cashier quoted, even
//! if the catalog price changed mid-sale. Documented trade-off; see
//! DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation::{validate_price_cents, validate_quantity};
use crate::MAX_CHECKOUT_LINES;

// =============================================================================
// Stock Policy
// =============================================================================

/// What to do when a checkout requests more than the available stock.
///
/// The legacy system silently drove stock negative. That behavior is kept
/// available but is an explicit configuration choice now, not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Abort the checkout when any line would drive stock negative.
    #[default]
    RejectOversell,
    /// Allow stock to go negative (shop accepts backorders).
    AllowNegative,
}

// =============================================================================
// Request Types
// =============================================================================

/// One cart line within a checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    /// Product identifier as known to the client.
    pub product_id: String,
    /// Product name as quoted at the till (denormalized onto the line).
    pub name: String,
    /// Unit price in cents as quoted at the till.
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CheckoutLine {
    /// Line total: unit price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// A fully-formed checkout, as assembled by the billing client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    /// Customer phone. Absent/empty means a walk-in sale with no customer
    /// record attached.
    pub customer_mobile: Option<String>,
    /// Username of the cashier at the till. Lookup is best-effort.
    pub cashier_name: Option<String>,
    pub lines: Vec<CheckoutLine>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
}

impl CheckoutRequest {
    /// Customer phone, with empty strings normalized to "no phone".
    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_mobile
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Cashier username, with empty strings normalized away.
    pub fn cashier(&self) -> Option<&str> {
        self.cashier_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Validates the request before a transaction is opened.
    ///
    /// Rules:
    /// - at most [`MAX_CHECKOUT_LINES`] lines; an EMPTY cart is valid and
    ///   produces a sale header with zero line items
    /// - every quantity positive and within range, every price >= 0, and
    ///   every line total representable in 64-bit cents
    /// - amounts non-negative, and `total == max(subtotal - discount, 0)`
    ///
    /// The subtotal itself is trusted from the caller, matching the stored
    /// receipt-fidelity model.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lines.len() > MAX_CHECKOUT_LINES {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 0,
                max: MAX_CHECKOUT_LINES as i64,
            });
        }

        for line in &self.lines {
            if line.product_id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "item id".to_string(),
                });
            }
            validate_quantity(line.quantity)?;
            validate_price_cents("price", line.unit_price_cents)?;
            // Gate the line-total multiply here so nothing downstream can
            // overflow on input that passed validation.
            if Money::from_cents(line.unit_price_cents)
                .checked_multiply_quantity(line.quantity)
                .is_none()
            {
                return Err(ValidationError::AmountOverflow {
                    field: "line total".to_string(),
                });
            }
        }

        validate_price_cents("subtotal", self.subtotal_cents)?;
        validate_price_cents("discount", self.discount_cents)?;
        validate_price_cents("total", self.total_cents)?;

        let expected = Money::from_cents(self.subtotal_cents)
            .discounted_by(Money::from_cents(self.discount_cents));
        if expected.cents() != self.total_cents {
            return Err(ValidationError::InconsistentTotal {
                expected: expected.cents(),
                got: self.total_cents,
            });
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_lines(lines: Vec<CheckoutLine>) -> CheckoutRequest {
        let subtotal: i64 = lines.iter().map(|l| l.line_total().cents()).sum();
        CheckoutRequest {
            customer_name: "Walk-in".to_string(),
            customer_mobile: None,
            cashier_name: Some("alice".to_string()),
            lines,
            subtotal_cents: subtotal,
            discount_cents: 0,
            total_cents: subtotal,
            payment_method: PaymentMethod::Cash,
        }
    }

    fn shirt_line(qty: i64) -> CheckoutLine {
        CheckoutLine {
            product_id: "7".to_string(),
            name: "Shirt".to_string(),
            unit_price_cents: 500,
            quantity: qty,
        }
    }

    #[test]
    fn empty_cart_is_valid() {
        let req = request_with_lines(vec![]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let req = request_with_lines(vec![shirt_line(0)]);
        assert!(matches!(
            req.validate(),
            Err(ValidationError::MustBePositive { .. })
        ));

        let req = request_with_lines(vec![shirt_line(-2)]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let mut line = shirt_line(1);
        line.unit_price_cents = -500;
        let mut req = request_with_lines(vec![line]);
        req.subtotal_cents = 0;
        req.total_cents = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn overflowing_line_total_rejected() {
        // Passes the per-field checks (price >= 0, quantity in range) but
        // the product would wrap i64.
        let mut line = shirt_line(3);
        line.unit_price_cents = i64::MAX / 2;
        let req = CheckoutRequest {
            customer_name: "Walk-in".to_string(),
            customer_mobile: None,
            cashier_name: None,
            lines: vec![line],
            subtotal_cents: 0,
            discount_cents: 0,
            total_cents: 0,
            payment_method: PaymentMethod::Cash,
        };
        assert!(matches!(
            req.validate(),
            Err(ValidationError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn inconsistent_total_rejected() {
        let mut req = request_with_lines(vec![shirt_line(2)]);
        req.total_cents += 1;
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InconsistentTotal { .. })
        ));
    }

    #[test]
    fn over_discount_clamps_to_zero_total() {
        let mut req = request_with_lines(vec![shirt_line(2)]);
        req.discount_cents = req.subtotal_cents + 100;
        req.total_cents = 0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_phone_means_walk_in() {
        let mut req = request_with_lines(vec![shirt_line(1)]);
        assert_eq!(req.customer_phone(), None);
        req.customer_mobile = Some("   ".to_string());
        assert_eq!(req.customer_phone(), None);
        req.customer_mobile = Some("5551234".to_string());
        assert_eq!(req.customer_phone(), Some("5551234"));
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        assert_eq!(shirt_line(2).line_total().cents(), 1000);
    }
}
