//! Aggregated top-of-book snapshots.
//!
//! A [`Snapshot`] is a plain value: once taken it no longer refers to the
//! book, so it can be formatted or published while the book keeps changing.

use std::fmt;

/// One aggregated price level: price and total resting quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSummary {
    pub price: f64,
    pub quantity: u64,
}

impl LevelSummary {
    pub fn new(price: f64, quantity: u64) -> Self {
        Self { price, quantity }
    }
}

impl From<(f64, u64)> for LevelSummary {
    fn from((price, quantity): (f64, u64)) -> Self {
        Self::new(price, quantity)
    }
}

/// Top `depth` levels of each side, best price first.
///
/// Bids are strictly descending by price, asks strictly ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub depth: usize,
    pub bids: Vec<LevelSummary>,
    pub asks: Vec<LevelSummary>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Bids as `(price, quantity)` pairs
    pub fn bid_pairs(&self) -> Vec<(f64, u64)> {
        self.bids.iter().map(|l| (l.price, l.quantity)).collect()
    }

    /// Asks as `(price, quantity)` pairs
    pub fn ask_pairs(&self) -> Vec<(f64, u64)> {
        self.asks.iter().map(|l| (l.price, l.quantity)).collect()
    }
}

const COLUMN_WIDTH: usize = 24;

impl fmt::Display for Snapshot {
    /// Two-column ladder, bids left and asks right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------ ORDER BOOK (top {} levels) ------", self.depth)?;
        writeln!(f, "{:<w$}{}", "Bids (price x qty)", "Asks (price x qty)", w = COLUMN_WIDTH)?;

        let rows = self.bids.len().max(self.asks.len());
        for i in 0..rows {
            let bid = self
                .bids
                .get(i)
                .map(|l| format!("{:.2} x {}", l.price, l.quantity))
                .unwrap_or_default();
            let ask = self
                .asks
                .get(i)
                .map(|l| format!("{:.2} x {}", l.price, l.quantity))
                .unwrap_or_default();
            writeln!(f, "{:<w$}{}", bid, ask, w = COLUMN_WIDTH)?;
        }

        write!(f, "---------------------------------------")
    }
}
