//! Order id to queue position table.
//!
//! An entry is an owned handle (side, price key, queue locator), not a
//! reference into either side's level map. It is resolved by lookup each
//! time it is used, so rebalancing of the `BTreeMap`s never invalidates it.

use std::collections::hash_map::{self, Entry, HashMap};

use crate::error::BookError;
use crate::orderbook::Locator;
use crate::types::{Price, Side};

/// Where a resting order lives: side, level price, position in that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocator {
    pub side: Side,
    pub price: Price,
    pub locator: Locator,
}

/// id -> [`OrderLocator`] for every resting order.
#[derive(Debug, Clone, Default)]
pub struct OrderLocatorTable {
    entries: HashMap<u64, OrderLocator>,
}

impl OrderLocatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Record a newly queued order.
    ///
    /// An id that is already present is rejected and the existing entry is
    /// left untouched.
    pub fn insert(
        &mut self,
        id: u64,
        side: Side,
        price: Price,
        locator: Locator,
    ) -> Result<(), BookError> {
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(BookError::Duplicate(id)),
            Entry::Vacant(entry) => {
                entry.insert(OrderLocator {
                    side,
                    price,
                    locator,
                });
                Ok(())
            }
        }
    }

    #[inline]
    pub fn find(&self, id: u64) -> Option<OrderLocator> {
        self.entries.get(&id).copied()
    }

    /// Remove an entry; only called alongside removing the order from its queue.
    #[inline]
    pub fn erase(&mut self, id: u64) -> Option<OrderLocator> {
        self.entries.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, u64, OrderLocator> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
