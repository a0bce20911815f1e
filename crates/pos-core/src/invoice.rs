//! # Invoice Numbers
//!
//! Formatting and parsing of the sequential invoice number attached to
//! every committed sale.
//!
//! ## Format
//! `INV` followed by a zero-padded 6-digit decimal sequence:
//! `INV000001`, `INV000002`, ... The width grows past `INV999999`
//! (`INV1000000`) rather than wrapping; the business key is the sequence,
//! not the width.
//!
//! ## Allocation vs arithmetic
//! This module is pure arithmetic. Allocation under concurrency is the
//! database's job (a locked counter row, see pos-db); a plain
//! "read last, increment" is a check-then-act race and is never used on
//! the write path. `sequence_after` exists for re-seeding the counter from
//! already-stored data, and carries the defined degenerate-input policy:
//! a stored value that does not parse restarts the sequence at 1 instead
//! of failing.

/// Prefix of every invoice number.
pub const INVOICE_PREFIX: &str = "INV";

/// Minimum width of the zero-padded numeric suffix.
pub const INVOICE_PAD_WIDTH: usize = 6;

/// Renders a sequence value as an invoice number.
///
/// ```
/// use pos_core::invoice::format_invoice_no;
///
/// assert_eq!(format_invoice_no(1), "INV000001");
/// assert_eq!(format_invoice_no(42), "INV000042");
/// assert_eq!(format_invoice_no(1_000_000), "INV1000000");
/// ```
pub fn format_invoice_no(seq: i64) -> String {
    format!("{INVOICE_PREFIX}{seq:0width$}", width = INVOICE_PAD_WIDTH)
}

/// Parses the numeric sequence out of an invoice number.
///
/// Returns `None` unless the value is the `INV` prefix followed by a
/// non-empty run of ASCII digits. Stricter than the legacy parser (which
/// accepted `INV12garbage` as 12): a malformed suffix is treated as
/// unparseable, which downstream maps to "start over at 1".
pub fn parse_invoice_no(invoice_no: &str) -> Option<i64> {
    let digits = invoice_no.strip_prefix(INVOICE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Returns the sequence the next sale should use, given the most recently
/// stored invoice number.
///
/// No previous sale, or a stored value that does not parse, yields 1
/// (`INV000001`). This degenerate-input fallback is deliberate policy, not
/// an error path.
pub fn sequence_after(last_invoice_no: Option<&str>) -> i64 {
    last_invoice_no
        .and_then(parse_invoice_no)
        .map(|seq| seq + 1)
        .unwrap_or(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_to_six_digits() {
        assert_eq!(format_invoice_no(1), "INV000001");
        assert_eq!(format_invoice_no(999), "INV000999");
        assert_eq!(format_invoice_no(999_999), "INV999999");
    }

    #[test]
    fn format_grows_past_six_digits() {
        assert_eq!(format_invoice_no(1_000_000), "INV1000000");
    }

    #[test]
    fn parse_round_trips() {
        for seq in [1, 7, 123_456, 2_000_000] {
            assert_eq!(parse_invoice_no(&format_invoice_no(seq)), Some(seq));
        }
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert_eq!(parse_invoice_no(""), None);
        assert_eq!(parse_invoice_no("INV"), None);
        assert_eq!(parse_invoice_no("INVOICE-7"), None);
        assert_eq!(parse_invoice_no("INV12ab"), None);
        assert_eq!(parse_invoice_no("X000001"), None);
        assert_eq!(parse_invoice_no("inv000001"), None);
    }

    #[test]
    fn sequence_starts_at_one() {
        assert_eq!(sequence_after(None), 1);
    }

    #[test]
    fn sequence_increments_last() {
        assert_eq!(sequence_after(Some("INV000041")), 42);
    }

    #[test]
    fn sequence_falls_back_on_garbage() {
        // Unparseable stored value restarts the run instead of failing.
        assert_eq!(sequence_after(Some("not-an-invoice")), 1);
        assert_eq!(sequence_after(Some("INVX")), 1);
    }
}
