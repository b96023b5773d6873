//! Fixed-point prices.
//!
//! ## Overview
//!
//! Callers hand the book `f64` prices, but an `f64` cannot key an ordered map
//! (no total order, and `100.1` computed two ways may differ in the last bit).
//! Prices are therefore converted once, at the boundary, into a `u64` tick
//! count scaled by 10^8, and every level lookup uses that key.
//!
//! ## Examples
//!
//! ```
//! use lob_core::types::price::{Price, SCALE};
//!
//! let price = Price::from_f64(101.25).unwrap();
//! assert_eq!(price.ticks(), 101 * SCALE + SCALE / 4);
//! assert_eq!(price.to_f64(), 101.25);
//! assert_eq!(price.to_string(), "101.25");
//!
//! assert!(Price::from_f64(-1.0).is_none());
//! assert!(Price::from_f64(f64::NAN).is_none());
//! ```

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

/// Largest whole price that fits the fixed-point representation
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

/// A limit price in fixed-point ticks (scaled by 10^8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    /// Wrap a raw tick count
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Convert a boundary `f64` price, rounding to the nearest tick.
    ///
    /// Returns `None` for NaN, infinities, negative values, and values
    /// above [`MAX_VALUE`].
    pub fn from_f64(value: f64) -> Option<Self> {
        let decimal = Decimal::from_f64(value)?;
        decimal_to_fixed(decimal).map(Self)
    }

    /// Raw tick count
    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Convert back to `f64` for snapshots and display
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", fixed_to_decimal(self.0).normalize())
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a Decimal to fixed-point u64
///
/// `None` if the value is negative or out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

// ============================================================================
// Unit Tests
// ============================================================================
