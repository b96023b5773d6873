//! Resting order types.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so the book can hash its
//! resting orders deterministically (see `OrderBook::state_root`). In SSZ,
//! fixed-size containers encode as concatenated little-endian
//! fields, so the encoding depends only on field values.
//!
//! ## Fixed-Point Price
//!
//! The limit price is stored as ticks scaled by 10^8 (see [`price`](super::price)).

use ssz_rs::prelude::*;

use crate::types::price::Price;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// `quantity` is the remaining quantity and is non-zero while the order
/// rests. `timestamp` only breaks ties; queue position is what the book
/// actually orders by.
///
/// ## SSZ Layout
///
/// Fixed-size container of 33 bytes (8+1+8+8+8).
///
/// ## Example
///
/// ```
/// use lob_core::types::{Order, Side};
/// use lob_core::types::price::Price;
///
/// let price = Price::from_f64(100.0).unwrap();
/// let order = Order::new(1, Side::Buy, price, 500, 1703577600000);
///
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.price(), price);
/// assert_eq!(order.price_f64(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Order identifier, unique among resting orders
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in fixed-point ticks (scaled by 10^8)
    pub price_raw: u64,

    /// Remaining quantity
    pub quantity: u64,

    /// Entry timestamp
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order
    pub fn new(id: u64, side: Side, price: Price, quantity: u64, timestamp: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price_raw: price.ticks(),
            quantity,
            timestamp,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the limit price
    #[inline]
    pub fn price(&self) -> Price {
        Price::from_ticks(self.price_raw)
    }

    /// Get the limit price as `f64`
    #[inline]
    pub fn price_f64(&self) -> f64 {
        self.price().to_f64()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
