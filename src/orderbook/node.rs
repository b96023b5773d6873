//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so a price
//! level's queue can unlink any member in O(1) given its slab key.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - A key stays valid until that entry is removed; other removals never move it
//! - Keys may be reused after `slab.remove()`
//!
//! ## Linked List
//!
//! - `next`: the next (newer) order at the same price
//! - `prev`: the previous (older) order at the same price
//!
//! `seq` is the append sequence number; together with the slab key it forms
//! the order's [`Locator`](crate::orderbook::Locator).

use crate::types::Order;

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order
    pub order: Order,

    /// Sequence number assigned when the node was appended to its level
    pub seq: u64,

    /// Next order in the level queue (None at the tail)
    pub next: Option<usize>,

    /// Previous order in the level queue (None at the head)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    #[inline]
    pub fn new(order: Order, seq: u64) -> Self {
        Self {
            order,
            seq,
            next: None,
            prev: None,
        }
    }

    /// True if neither neighbour pointer is set
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
