//! Ordered price levels for one side of the book.
//!
//! ## Price Ordering
//!
//! Each side keeps exactly one `BTreeMap` from price key to [`PriceLevel`].
//! The key type carries the side's comparator, so map order *is* priority
//! order and no second sorted structure has to be kept in step:
//!
//! - **Bids** ([`Descending`]): keyed by `Reverse(price)`, best = highest
//! - **Asks** ([`Ascending`]): keyed by `price`, best = lowest
//!
//! Inserting a new price is O(log levels); nothing is ever re-sorted.

use std::cmp::Reverse;
use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::orderbook::PriceLevel;
use crate::types::Price;

/// Maps a price to the key that sorts a side's levels best-first.
pub trait LevelOrdering {
    type Key: Ord + Copy + fmt::Debug;

    fn key(price: Price) -> Self::Key;
}

/// Highest price first (bids)
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl LevelOrdering for Descending {
    type Key = Reverse<Price>;

    #[inline]
    fn key(price: Price) -> Self::Key {
        Reverse(price)
    }
}

/// Lowest price first (asks)
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

impl LevelOrdering for Ascending {
    type Key = Price;

    #[inline]
    fn key(price: Price) -> Self::Key {
        price
    }
}

/// Active price levels of one side, in priority order.
#[derive(Debug, Clone)]
pub struct PriceLevelIndex<O: LevelOrdering> {
    levels: BTreeMap<O::Key, PriceLevel>,
    _ordering: PhantomData<O>,
}

/// Bid side: highest price first
pub type BidLevels = PriceLevelIndex<Descending>;

/// Ask side: lowest price first
pub type AskLevels = PriceLevelIndex<Ascending>;

impl<O: LevelOrdering> Default for PriceLevelIndex<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: LevelOrdering> PriceLevelIndex<O> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            _ordering: PhantomData,
        }
    }

    /// Number of active price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[inline]
    pub fn contains(&self, price: Price) -> bool {
        self.levels.contains_key(&O::key(price))
    }

    #[inline]
    pub fn get(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&O::key(price))
    }

    #[inline]
    pub fn get_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&O::key(price))
    }

    /// Get the level at `price`, creating an empty one in sorted position if absent
    pub fn get_or_create(&mut self, price: Price) -> &mut PriceLevel {
        match self.levels.entry(O::key(price)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                trace!(%price, "price level created");
                entry.insert(PriceLevel::new(price))
            }
        }
    }

    /// Drop the level at `price` if its queue is empty.
    ///
    /// Returns true if a level was removed.
    pub fn remove_if_empty(&mut self, price: Price) -> bool {
        let key = O::key(price);
        match self.levels.get(&key) {
            Some(level) if level.is_empty() => {
                self.levels.remove(&key);
                trace!(%price, "price level removed");
                true
            }
            _ => false,
        }
    }

    /// Best level (highest bid / lowest ask)
    #[inline]
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    /// Levels in priority order
    #[inline]
    pub fn iter(&self) -> btree_map::Values<'_, O::Key, PriceLevel> {
        self.levels.values()
    }

    /// First `n` `(price, aggregate)` pairs in priority order.
    ///
    /// Fewer than `n` levels yields all of them; nothing is padded.
    pub fn top_n(&self, n: usize) -> Vec<(Price, u64)> {
        self.levels
            .values()
            .take(n)
            .map(|level| (level.price, level.total_quantity))
            .collect()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
