//! FIFO queue of resting orders at one price.
//!
//! ## Design
//!
//! The queue itself only holds head/tail slab keys and a length; the nodes
//! live in the book-wide `Slab<OrderNode>` and are chained through their
//! `prev`/`next` keys:
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Any order can be unlinked in O(1) through its [`Locator`]
//! - Unlinking never moves another node, so every other locator stays valid
//!
//! ## Locators
//!
//! Slab keys are reused after removal, so a bare key could later resolve to
//! an unrelated order. A [`Locator`] pairs the key with the sequence number
//! stamped on the node when it was appended; a locator whose node has been
//! removed no longer matches and resolves to nothing.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::Order;

/// Stable reference to one order's position in its level queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator {
    key: usize,
    seq: u64,
}

impl Locator {
    /// Slab key of the referenced node
    #[inline]
    pub fn key(&self) -> usize {
        self.key
    }

    /// Resolve to the node, if it is still the one this locator was issued for
    #[inline]
    pub fn resolve<'a>(&self, slab: &'a Slab<OrderNode>) -> Option<&'a OrderNode> {
        slab.get(self.key).filter(|node| node.seq == self.seq)
    }

    #[inline]
    fn resolve_mut<'a>(&self, slab: &'a mut Slab<OrderNode>) -> Option<&'a mut OrderNode> {
        slab.get_mut(self.key).filter(|node| node.seq == self.seq)
    }
}

/// Arrival-ordered, doubly-linked queue of order nodes.
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    /// Oldest order (slab key)
    head: Option<usize>,

    /// Newest order (slab key)
    tail: Option<usize>,

    /// Number of linked orders
    len: usize,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slab key of the oldest order
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slab key of the newest order
    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Store `order` in the slab and link it at the tail.
    ///
    /// `seq` must be unique over the lifetime of the slab; it is what makes
    /// the returned locator distinguishable from later users of the same key.
    pub fn push_back(&mut self, order: Order, seq: u64, slab: &mut Slab<OrderNode>) -> Locator {
        let key = slab.insert(OrderNode::new(order, seq));
        self.link_back(key, slab);
        Locator { key, seq }
    }

    /// Unlink the referenced order and take it out of the slab.
    ///
    /// Returns `None` if the locator no longer resolves.
    pub fn remove(&mut self, locator: Locator, slab: &mut Slab<OrderNode>) -> Option<Order> {
        locator.resolve(slab)?;
        self.unlink(locator.key, slab);
        Some(slab.remove(locator.key).order)
    }

    /// Move the referenced order to the tail without changing its locator.
    pub fn move_to_back(&mut self, locator: Locator, slab: &mut Slab<OrderNode>) -> bool {
        if locator.resolve(slab).is_none() {
            return false;
        }
        if self.tail != Some(locator.key) {
            self.unlink(locator.key, slab);
            self.link_back(locator.key, slab);
        }
        true
    }

    /// Borrow the referenced order
    #[inline]
    pub fn get<'a>(&self, locator: Locator, slab: &'a Slab<OrderNode>) -> Option<&'a Order> {
        locator.resolve(slab).map(|node| &node.order)
    }

    /// Mutably borrow the referenced order. Queue position is unaffected.
    #[inline]
    pub fn get_mut<'a>(
        &self,
        locator: Locator,
        slab: &'a mut Slab<OrderNode>,
    ) -> Option<&'a mut Order> {
        locator.resolve_mut(slab).map(|node| &mut node.order)
    }

    /// Iterate orders oldest to newest
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> Iter<'a> {
        Iter {
            slab,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn link_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        if let Some(node) = slab.get_mut(key) {
            node.prev = self.tail;
            node.next = None;
        }

        match self.tail.and_then(|tail| slab.get_mut(tail)) {
            Some(tail_node) => tail_node.next = Some(key),
            // Empty list - this is also the head
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.len += 1;
    }

    fn unlink(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let Some(node) = slab.get_mut(key) else {
            return;
        };
        let prev_key = node.prev.take();
        let next_key = node.next.take();

        match prev_key.and_then(|prev| slab.get_mut(prev)) {
            Some(prev_node) => prev_node.next = next_key,
            // This was the head
            None => self.head = next_key,
        }

        match next_key.and_then(|next| slab.get_mut(next)) {
            Some(next_node) => next_node.prev = prev_key,
            // This was the tail
            None => self.tail = prev_key,
        }

        self.len -= 1;
    }
}

/// Arrival-order iterator over one queue.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    /// An iterator that yields nothing
    pub fn empty(slab: &'a Slab<OrderNode>) -> Self {
        Self {
            slab,
            cursor: None,
            remaining: 0,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.order)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, Side};

    fn order(id: u64, quantity: u64) -> Order {
        Order::new(id, Side::Buy, Price::from_f64(100.0).unwrap(), quantity, id)
    }

    fn ids(queue: &OrderQueue, slab: &Slab<OrderNode>) -> Vec<u64> {
        queue.iter(slab).map(|o| o.id).collect()
    }

    #[test]
    fn test_push_back_links_in_arrival_order() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        let l2 = queue.push_back(order(2, 20), 2, &mut slab);
        let l3 = queue.push_back(order(3, 30), 3, &mut slab);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.head(), Some(l1.key()));
        assert_eq!(queue.tail(), Some(l3.key()));
        assert_eq!(ids(&queue, &slab), vec![1, 2, 3]);

        let middle = l2.resolve(&slab).unwrap();
        assert_eq!(middle.prev, Some(l1.key()));
        assert_eq!(middle.next, Some(l3.key()));
    }

    #[test]
    fn test_remove_middle_keeps_neighbours_valid() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        let l2 = queue.push_back(order(2, 20), 2, &mut slab);
        let l3 = queue.push_back(order(3, 30), 3, &mut slab);

        let removed = queue.remove(l2, &mut slab).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(ids(&queue, &slab), vec![1, 3]);
        assert_eq!(queue.get(l1, &slab).unwrap().id, 1);
        assert_eq!(queue.get(l3, &slab).unwrap().id, 3);
        assert_eq!(slab.len(), 2);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        let l2 = queue.push_back(order(2, 20), 2, &mut slab);
        let l3 = queue.push_back(order(3, 30), 3, &mut slab);

        queue.remove(l1, &mut slab).unwrap();
        assert_eq!(queue.head(), Some(l2.key()));
        queue.remove(l3, &mut slab).unwrap();
        assert_eq!(queue.tail(), Some(l2.key()));

        let only = l2.resolve(&slab).unwrap();
        assert!(only.is_unlinked());

        queue.remove(l2, &mut slab).unwrap();
        assert!(queue.is_empty());
        assert!(queue.head().is_none());
        assert!(queue.tail().is_none());
    }

    #[test]
    fn test_remove_twice_reports_not_found() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        queue.push_back(order(2, 20), 2, &mut slab);

        assert!(queue.remove(l1, &mut slab).is_some());
        assert!(queue.remove(l1, &mut slab).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_stale_locator_does_not_resolve_reused_key() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let old = queue.push_back(order(1, 10), 1, &mut slab);
        queue.remove(old, &mut slab).unwrap();

        // Slab hands the freed key straight back out
        let new = queue.push_back(order(2, 20), 2, &mut slab);
        assert_eq!(new.key(), old.key());

        assert!(queue.get(old, &slab).is_none());
        assert!(queue.remove(old, &mut slab).is_none());
        assert_eq!(ids(&queue, &slab), vec![2]);
    }

    #[test]
    fn test_get_mut_keeps_position() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        queue.push_back(order(2, 20), 2, &mut slab);

        queue.get_mut(l1, &mut slab).unwrap().quantity = 99;

        let orders: Vec<(u64, u64)> = queue.iter(&slab).map(|o| (o.id, o.quantity)).collect();
        assert_eq!(orders, vec![(1, 99), (2, 20)]);
    }

    #[test]
    fn test_move_to_back() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        let l1 = queue.push_back(order(1, 10), 1, &mut slab);
        let l2 = queue.push_back(order(2, 20), 2, &mut slab);
        queue.push_back(order(3, 30), 3, &mut slab);

        assert!(queue.move_to_back(l1, &mut slab));
        assert_eq!(ids(&queue, &slab), vec![2, 3, 1]);
        assert_eq!(queue.head(), Some(l2.key()));
        assert_eq!(queue.tail(), Some(l1.key()));
        assert_eq!(queue.len(), 3);

        // Already the tail
        assert!(queue.move_to_back(l1, &mut slab));
        assert_eq!(ids(&queue, &slab), vec![2, 3, 1]);
    }

    #[test]
    fn test_iter_size_hint() {
        let mut slab = Slab::with_capacity(10);
        let mut queue = OrderQueue::new();

        queue.push_back(order(1, 10), 1, &mut slab);
        queue.push_back(order(2, 20), 2, &mut slab);

        let mut iter = queue.iter(&slab);
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        assert_eq!(iter.size_hint(), (1, Some(1)));
        assert_eq!(Iter::empty(&slab).count(), 0);
    }
}
