//! Order book: price levels, FIFO queues, and the id locator table.
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list keys, stored in the slab
//! - [`OrderQueue`] / [`Locator`]: per-level FIFO with O(1) removal
//! - [`PriceLevel`]: price, aggregate quantity, queue
//! - [`PriceLevelIndex`]: one side's levels in priority order
//! - [`OrderLocatorTable`]: order id -> (side, price, locator)
//! - [`OrderBook`]: add / cancel / amend / snapshot
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log levels) |
//! | Cancel by id | O(log levels) to find the level, O(1) to unlink |
//! | Amend quantity | O(log levels) |
//! | Amend price | cancel + add |
//! | Snapshot | O(depth) per side |

pub mod node;
pub mod queue;
pub mod level;
pub mod index;
pub mod locator;
pub mod book;

pub use node::OrderNode;
pub use queue::{Locator, OrderQueue};
pub use level::PriceLevel;
pub use index::{AskLevels, Ascending, BidLevels, Descending, LevelOrdering, PriceLevelIndex};
pub use locator::{OrderLocator, OrderLocatorTable};
pub use book::OrderBook;
