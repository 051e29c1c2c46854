//! Error types for basket construction.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while turning line items into a basket.
///
/// A basket is built in a single pass; the first error aborts it and no
/// partial basket is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// Per-unit proration divides by the quantity, so it must be positive.
    #[error("line item {line} has non-positive quantity {quantity}")]
    NonPositiveQuantity {
        /// Zero-based index of the offending line item.
        line: usize,
        /// The quantity as supplied.
        quantity: Decimal,
    },

    /// Decimal arithmetic left the representable range.
    #[error("decimal overflow while pricing line item {line}")]
    Overflow {
        /// Zero-based index of the offending line item.
        line: usize,
    },
}

/// Result type alias for `BasketError`.
pub type Result<T> = std::result::Result<T, BasketError>;
