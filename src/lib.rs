//! # lob-core
//!
//! Resting-order state of one instrument's limit order book.
//!
//! ## Architecture
//!
//! - **Types**: `Order`, `Side`, fixed-point `Price`, `Snapshot`
//! - **OrderBook**: slab-backed FIFO level queues, one ordered level map per
//!   side, and an id -> locator table kept in step with both
//!
//! ## Design Principles
//!
//! 1. **Stable locators**: removing an order never moves another one
//! 2. **No floating-point keys**: boundary `f64` prices become 10^8-scaled ticks
//! 3. **Single writer**: no internal locking; callers serialize mutations
//! 4. **All-or-nothing**: a failed call leaves the book unchanged
//!
//! Crossing orders are not matched; both sides simply rest.

pub mod config;
pub mod error;
pub mod orderbook;
pub mod types;

pub use config::{AmendPriority, BookConfig, RepriceSide, ZeroQuantityPolicy};
pub use error::BookError;
pub use orderbook::{OrderBook, PriceLevel};
pub use types::{LevelSummary, Order, Price, Side, Snapshot};
