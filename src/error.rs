//! Errors reported by order book operations.
//!
//! Every variant is an expected outcome on the hot path: callers get it back
//! through a `Result` and the book is left exactly as it was before the call.

use thiserror::Error;

/// Failure of an `add`/`cancel`/`amend` call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BookError {
    /// Cancel or amend referenced an id that is not resting
    #[error("order {0} is not resting in the book")]
    NotFound(u64),

    /// Add referenced an id that is already resting
    #[error("order {0} is already resting in the book")]
    Duplicate(u64),

    /// Zero quantity on add or amend (only under `ZeroQuantityPolicy::Reject`)
    #[error("order {0} has zero quantity")]
    InvalidQuantity(u64),

    /// Price is NaN, infinite, negative, or too large for the fixed-point scale
    #[error("invalid limit price {0}")]
    InvalidPrice(f64),

    /// The order would push its level's aggregate quantity past `u64::MAX`
    #[error("order {0} would overflow its price level's total quantity")]
    QuantityOverflow(u64),

    /// A resting order could not be SSZ-encoded while hashing the book
    #[error("failed to encode order {0}")]
    Encoding(u64),
}

impl BookError {
    /// The order id the failure refers to, if any.
    pub fn order_id(&self) -> Option<u64> {
        match self {
            BookError::NotFound(id)
            | BookError::Duplicate(id)
            | BookError::InvalidQuantity(id)
            | BookError::QuantityOverflow(id)
            | BookError::Encoding(id) => Some(*id),
            BookError::InvalidPrice(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(BookError::NotFound(7).to_string(), "order 7 is not resting in the book");
        assert_eq!(BookError::Duplicate(3).to_string(), "order 3 is already resting in the book");
        assert_eq!(BookError::InvalidPrice(-1.5).to_string(), "invalid limit price -1.5");
    }

    #[test]
    fn test_error_order_id() {
        assert_eq!(BookError::NotFound(7).order_id(), Some(7));
        assert_eq!(BookError::InvalidQuantity(9).order_id(), Some(9));
        assert_eq!(BookError::QuantityOverflow(4).order_id(), Some(4));
        assert_eq!(BookError::InvalidPrice(f64::NAN).order_id(), None);
    }
}
