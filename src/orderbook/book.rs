//! The order book facade.
//!
//! ## Architecture
//!
//! - **Slab**: one `Slab<OrderNode>` holds every resting order; level queues
//!   chain through it by key
//! - **BTreeMap** (per side): price key -> [`PriceLevel`], in priority order
//! - **Locator table**: order id -> (side, price, [`Locator`]) for O(1)
//!   cancel/amend without scanning any level
//!
//! Every public mutation either completes and leaves these three in step, or
//! returns an error having changed nothing.
//!
//! ## Example
//!
//! ```
//! use lob_core::{OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! book.add_order(1, Side::Buy, 100.0, 500, 1).unwrap();
//! book.add_order(2, Side::Buy, 101.0, 200, 2).unwrap();
//! book.add_order(3, Side::Sell, 102.0, 300, 3).unwrap();
//! book.add_order(5, Side::Buy, 101.0, 100, 4).unwrap();
//!
//! let snapshot = book.snapshot(5);
//! assert_eq!(snapshot.bid_pairs(), vec![(101.0, 300), (100.0, 500)]);
//! assert_eq!(snapshot.ask_pairs(), vec![(102.0, 300)]);
//!
//! book.cancel_order(2).unwrap();
//! assert!(book.cancel_order(2).is_err());
//! assert_eq!(book.best_bid(), Some(101.0));
//! ```

use slab::Slab;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::{AmendPriority, BookConfig, RepriceSide, ZeroQuantityPolicy};
use crate::error::BookError;
use crate::orderbook::index::{AskLevels, BidLevels};
use crate::orderbook::locator::{OrderLocator, OrderLocatorTable};
use crate::orderbook::queue::Iter;
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{LevelSummary, Order, Price, Side, Snapshot};

/// Resting-order state of one instrument.
#[derive(Debug)]
pub struct OrderBook {
    /// Node storage for every level queue
    orders: Slab<OrderNode>,

    /// Bid price levels (highest first)
    bids: BidLevels,

    /// Ask price levels (lowest first)
    asks: AskLevels,

    /// Order id -> queue position
    locators: OrderLocatorTable,

    config: BookConfig,

    /// Next append sequence number (half of every locator)
    next_seq: u64,

    /// Latest timestamp seen; re-queued orders are stamped after it
    clock: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with the default configuration
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create an empty book with room for `order_capacity` orders
    ///
    /// ```
    /// use lob_core::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().with_order_capacity(order_capacity))
    }

    /// Create an empty book with explicit policies and capacity
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            bids: BidLevels::new(),
            asks: AskLevels::new(),
            locators: OrderLocatorTable::with_capacity(config.order_capacity),
            config,
            next_seq: 0,
            clock: 0,
        }
    }

    /// Policies this book was created with
    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.locators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Rest a new order at the tail of its price level.
    ///
    /// A zero `quantity` is handled per [`ZeroQuantityPolicy`]. An id that is
    /// already resting is rejected with [`BookError::Duplicate`]; the resting
    /// order is not touched. An order that would push its level's aggregate
    /// past `u64::MAX` is rejected with [`BookError::QuantityOverflow`].
    pub fn add_order(
        &mut self,
        id: u64,
        side: Side,
        price: f64,
        quantity: u64,
        timestamp: u64,
    ) -> Result<(), BookError> {
        if quantity == 0 {
            return self.zero_quantity(id);
        }
        let limit = Price::from_f64(price).ok_or(BookError::InvalidPrice(price))?;
        if self.locators.contains(id) {
            debug!(order_id = id, "add rejected: id already resting");
            return Err(BookError::Duplicate(id));
        }
        self.check_level_total(id, side, limit, quantity)?;

        self.clock = self.clock.max(timestamp);
        self.insert(Order::new(id, side, limit, quantity, timestamp))?;

        debug!(order_id = id, ?side, price = %limit, quantity, "order added");
        Ok(())
    }

    /// Remove a resting order.
    ///
    /// Cancelling an id that is not resting returns [`BookError::NotFound`]
    /// and changes nothing, however many times it is repeated.
    ///
    /// ```
    /// use lob_core::{BookError, OrderBook, Side};
    ///
    /// let mut book = OrderBook::new();
    /// book.add_order(42, Side::Buy, 100.0, 10, 0).unwrap();
    ///
    /// assert!(book.cancel_order(42).is_ok());
    /// assert_eq!(book.cancel_order(42), Err(BookError::NotFound(42)));
    /// assert!(book.is_empty());
    /// ```
    pub fn cancel_order(&mut self, id: u64) -> Result<(), BookError> {
        let order = match self.detach(id) {
            Ok(order) => order,
            Err(err) => {
                debug!(order_id = id, "cancel rejected: not resting");
                return Err(err);
            }
        };

        debug!(order_id = id, side = ?order.side(), price = %order.price(), "order cancelled");
        Ok(())
    }

    /// Change a resting order's price and/or quantity.
    ///
    /// - Same price: the quantity is updated in place and the order keeps
    ///   its queue position (under [`AmendPriority::LoseOnIncrease`] an
    ///   increase instead moves it to the tail of its level).
    /// - New price: the order is removed and re-entered at the tail of the
    ///   destination level with a fresh timestamp; it loses time priority.
    ///   The destination side follows [`RepriceSide`].
    pub fn amend_order(&mut self, id: u64, new_price: f64, new_quantity: u64) -> Result<(), BookError> {
        let entry = self.locators.find(id).ok_or_else(|| {
            debug!(order_id = id, "amend rejected: not resting");
            BookError::NotFound(id)
        })?;
        if new_quantity == 0 {
            return self.zero_quantity(id);
        }
        let limit = Price::from_f64(new_price).ok_or(BookError::InvalidPrice(new_price))?;

        if limit == entry.price {
            self.amend_quantity(id, entry, new_quantity)
        } else {
            self.amend_price(id, limit, new_quantity)
        }
    }

    /// Top `depth` levels per side, best first.
    ///
    /// Pure read. `depth = 0` yields two empty sides; a depth beyond the
    /// number of active levels yields exactly the active levels.
    pub fn snapshot(&self, depth: usize) -> Snapshot {
        let summarize = |(price, quantity): (Price, u64)| LevelSummary::new(price.to_f64(), quantity);

        Snapshot {
            depth,
            bids: self.bids.top_n(depth).into_iter().map(summarize).collect(),
            asks: self.asks.top_n(depth).into_iter().map(summarize).collect(),
        }
    }

    /// Remove every order and level
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.locators.clear();
    }

    // ========================================================================
    // Lookup and Audit
    // ========================================================================

    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.locators.contains(id)
    }

    /// Borrow a resting order by id
    pub fn get_order(&self, id: u64) -> Option<&Order> {
        let entry = self.locators.find(id)?;
        entry.locator.resolve(&self.orders).map(|node| &node.order)
    }

    /// Where a resting order lives
    #[inline]
    pub fn locate(&self, id: u64) -> Option<OrderLocator> {
        self.locators.find(id)
    }

    /// Best bid price (highest buy price)
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best().map(|level| level.price.to_f64())
    }

    /// Best ask price (lowest sell price)
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best().map(|level| level.price.to_f64())
    }

    /// `best_ask - best_bid`; `None` if a side is empty or the book is crossed
    pub fn spread(&self) -> Option<f64> {
        let bid = self.bids.best()?.price.ticks();
        let ask = self.asks.best()?.price.ticks();
        ask.checked_sub(bid).map(|ticks| Price::from_ticks(ticks).to_f64())
    }

    /// Levels of one side in priority order
    pub fn levels(&self, side: Side) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match side {
            Side::Buy => Box::new(self.bids.iter()),
            Side::Sell => Box::new(self.asks.iter()),
        }
    }

    /// Orders resting at one price, in arrival order
    pub fn level_orders(&self, side: Side, price: f64) -> Iter<'_> {
        let level = Price::from_f64(price).and_then(|price| match side {
            Side::Buy => self.bids.get(price),
            Side::Sell => self.asks.get(price),
        });

        match level {
            Some(level) => self.orders(level),
            None => Iter::empty(&self.orders),
        }
    }

    /// Orders of a level obtained from [`levels`](Self::levels), in arrival order
    #[inline]
    pub fn orders<'a>(&'a self, level: &PriceLevel) -> Iter<'a> {
        level.orders(&self.orders)
    }

    /// SHA-256 over the SSZ encoding of every resting order.
    ///
    /// Orders are hashed bids first then asks, each side best level first
    /// and each level in queue order, so two books with identical histories
    /// produce identical roots.
    pub fn state_root(&self) -> Result<[u8; 32], BookError> {
        let mut hasher = Sha256::new();

        for level in self.bids.iter().chain(self.asks.iter()) {
            for order in level.orders(&self.orders) {
                let bytes = ssz_rs::serialize(order).map_err(|_| BookError::Encoding(order.id))?;
                hasher.update(&bytes);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> Result<String, BookError> {
        self.state_root().map(hex::encode)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Append `order` to its level and record its locator.
    fn insert(&mut self, order: Order) -> Result<(), BookError> {
        let id = order.id;
        let side = order.side();
        let price = order.price();
        if self.locators.contains(id) {
            return Err(BookError::Duplicate(id));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let level = match side {
            Side::Buy => self.bids.get_or_create(price),
            Side::Sell => self.asks.get_or_create(price),
        };
        let locator = level.append(order, seq, &mut self.orders);

        self.locators.insert(id, side, price, locator)
    }

    /// Unlink a resting order from its level, drop the level if that emptied
    /// it, and erase its locator entry.
    fn detach(&mut self, id: u64) -> Result<Order, BookError> {
        let entry = self.locators.find(id).ok_or(BookError::NotFound(id))?;

        let order = match entry.side {
            Side::Buy => {
                let order = self
                    .bids
                    .get_mut(entry.price)
                    .and_then(|level| level.remove(entry.locator, &mut self.orders));
                self.bids.remove_if_empty(entry.price);
                order
            }
            Side::Sell => {
                let order = self
                    .asks
                    .get_mut(entry.price)
                    .and_then(|level| level.remove(entry.locator, &mut self.orders));
                self.asks.remove_if_empty(entry.price);
                order
            }
        }
        .ok_or(BookError::NotFound(id))?;

        self.locators.erase(id);
        Ok(order)
    }

    fn amend_quantity(
        &mut self,
        id: u64,
        entry: OrderLocator,
        new_quantity: u64,
    ) -> Result<(), BookError> {
        let requeue_on_increase = self.config.amend_priority == AmendPriority::LoseOnIncrease;
        let timestamp = self.clock.saturating_add(1);

        let level = match entry.side {
            Side::Buy => self.bids.get_mut(entry.price),
            Side::Sell => self.asks.get_mut(entry.price),
        }
        .ok_or(BookError::NotFound(id))?;

        let current = level
            .get(entry.locator, &self.orders)
            .map(|order| order.quantity)
            .ok_or(BookError::NotFound(id))?;

        if level.checked_total(new_quantity, current).is_none() {
            debug!(order_id = id, quantity = new_quantity, "amend rejected: level total overflow");
            return Err(BookError::QuantityOverflow(id));
        }

        let requeued = requeue_on_increase && new_quantity > current;
        if requeued {
            level.requeue(entry.locator, new_quantity, timestamp, &mut self.orders);
            self.clock = timestamp;
        } else {
            level.set_quantity(entry.locator, new_quantity, &mut self.orders);
        }

        debug!(order_id = id, from = current, to = new_quantity, requeued, "order quantity amended");
        Ok(())
    }

    fn amend_price(&mut self, id: u64, price: Price, new_quantity: u64) -> Result<(), BookError> {
        let entry = self.locators.find(id).ok_or(BookError::NotFound(id))?;
        // Detaching from the source level never moves the opposite best, so
        // the destination is fixed before anything is touched.
        let side = self.reprice_side(entry.side, price);
        self.check_level_total(id, side, price, new_quantity)?;

        let mut order = self.detach(id)?;
        let from = order.price();

        self.clock = self.clock.saturating_add(1);
        order.side_raw = side.to_u8();
        order.price_raw = price.ticks();
        order.quantity = new_quantity;
        order.timestamp = self.clock;

        self.insert(order)?;

        debug!(order_id = id, ?side, %from, to = %price, quantity = new_quantity, "order re-priced");
        Ok(())
    }

    /// Reject `quantity` joining the level at (`side`, `price`) if the
    /// level's aggregate would overflow
    fn check_level_total(
        &self,
        id: u64,
        side: Side,
        price: Price,
        quantity: u64,
    ) -> Result<(), BookError> {
        let level = match side {
            Side::Buy => self.bids.get(price),
            Side::Sell => self.asks.get(price),
        };

        match level {
            Some(level) if level.checked_total(quantity, 0).is_none() => {
                debug!(order_id = id, %price, quantity, "rejected: level total overflow");
                Err(BookError::QuantityOverflow(id))
            }
            _ => Ok(()),
        }
    }

    /// Side a re-priced order re-enters on
    fn reprice_side(&self, side: Side, price: Price) -> Side {
        if self.config.reprice_side == RepriceSide::Keep {
            return side;
        }

        let crosses = match side {
            Side::Buy => self.asks.best().is_some_and(|level| price >= level.price),
            Side::Sell => self.bids.best().is_some_and(|level| price <= level.price),
        };

        if crosses {
            side.opposite()
        } else {
            side
        }
    }

    fn zero_quantity(&self, id: u64) -> Result<(), BookError> {
        match self.config.zero_quantity {
            ZeroQuantityPolicy::Drop => {
                debug!(order_id = id, "zero quantity dropped");
                Ok(())
            }
            ZeroQuantityPolicy::Reject => Err(BookError::InvalidQuantity(id)),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
