//! Core data types.
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`Price`]: Fixed-point limit price (ticks scaled by 10^8)
//! - [`Snapshot`] / [`LevelSummary`]: Aggregated top-of-book view

mod order;
mod snapshot;
pub mod price;

pub use order::{Order, Side};
pub use price::Price;
pub use snapshot::{LevelSummary, Snapshot};
