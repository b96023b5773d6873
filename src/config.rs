//! Book construction parameters and policy switches.
//!
//! ## Example
//!
//! ```
//! use lob_core::config::{AmendPriority, BookConfig, ZeroQuantityPolicy};
//! use lob_core::OrderBook;
//!
//! let config = BookConfig::default()
//!     .with_order_capacity(50_000)
//!     .with_amend_priority(AmendPriority::LoseOnIncrease)
//!     .with_zero_quantity(ZeroQuantityPolicy::Reject);
//!
//! let book = OrderBook::with_config(config);
//! assert!(book.capacity() >= 50_000);
//! ```

/// Default number of order slots pre-allocated by `OrderBook::new`.
pub const DEFAULT_ORDER_CAPACITY: usize = 1_024;

/// Queue priority rule for a same-price quantity amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmendPriority {
    /// Keep queue position on every same-price amendment, increases included
    #[default]
    PreserveAlways,
    /// Keep position on a decrease; an increase re-queues at the level tail
    LoseOnIncrease,
}

/// Side a price-changing amendment re-enters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepriceSide {
    /// Re-enter on the opposite side when the new price reaches or crosses
    /// that side's best price (a bid re-priced to `>=` best ask becomes an
    /// ask, an ask re-priced to `<=` best bid becomes a bid)
    #[default]
    CrossToOpposite,
    /// Always re-enter on the order's own side
    Keep,
}

/// What add/amend do with a zero quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZeroQuantityPolicy {
    /// Ignore the request and report success
    #[default]
    Drop,
    /// Report `BookError::InvalidQuantity`
    Reject,
}

/// Configuration for an [`OrderBook`](crate::OrderBook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Order slots (and locator entries) to pre-allocate
    pub order_capacity: usize,

    /// Priority rule for same-price quantity amendments
    pub amend_priority: AmendPriority,

    /// Handling of zero-quantity add/amend
    pub zero_quantity: ZeroQuantityPolicy,

    /// Side selection for price-changing amendments
    pub reprice_side: RepriceSide,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            amend_priority: AmendPriority::default(),
            zero_quantity: ZeroQuantityPolicy::default(),
            reprice_side: RepriceSide::default(),
        }
    }
}

impl BookConfig {
    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    pub fn with_amend_priority(mut self, amend_priority: AmendPriority) -> Self {
        self.amend_priority = amend_priority;
        self
    }

    pub fn with_zero_quantity(mut self, zero_quantity: ZeroQuantityPolicy) -> Self {
        self.zero_quantity = zero_quantity;
        self
    }

    pub fn with_reprice_side(mut self, reprice_side: RepriceSide) -> Self {
        self.reprice_side = reprice_side;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BookConfig::default();
        assert_eq!(config.order_capacity, DEFAULT_ORDER_CAPACITY);
        assert_eq!(config.amend_priority, AmendPriority::PreserveAlways);
        assert_eq!(config.zero_quantity, ZeroQuantityPolicy::Drop);
        assert_eq!(config.reprice_side, RepriceSide::CrossToOpposite);
    }

    #[test]
    fn test_builder_methods() {
        let config = BookConfig::default()
            .with_order_capacity(8)
            .with_amend_priority(AmendPriority::LoseOnIncrease)
            .with_zero_quantity(ZeroQuantityPolicy::Reject)
            .with_reprice_side(RepriceSide::Keep);

        assert_eq!(config.order_capacity, 8);
        assert_eq!(config.reprice_side, RepriceSide::Keep);
        assert_eq!(config.amend_priority, AmendPriority::LoseOnIncrease);
        assert_eq!(config.zero_quantity, ZeroQuantityPolicy::Reject);
    }
}
