//! Price level: one price, its aggregate quantity, and its order queue.
//!
//! Every mutation goes through the level so `total_quantity` is adjusted in
//! the same call that changes queue membership or an order's quantity; the
//! aggregate always equals the sum of the queued orders' quantities.
//!
//! The aggregate is a `u64`. Callers check a change with
//! [`PriceLevel::checked_total`] first; the mutators assume it fits.

use slab::Slab;

use crate::orderbook::queue::{Iter, Locator, OrderQueue};
use crate::orderbook::OrderNode;
use crate::types::{Order, Price};

/// All resting orders at a single price on one side.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level
    pub price: Price,

    /// Sum of remaining quantity over the queue
    pub total_quantity: u64,

    /// Orders in arrival order
    queue: OrderQueue,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            queue: OrderQueue::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of orders at this price level
    #[inline]
    pub fn order_count(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    /// Aggregate after adding `added` and removing `removed`, or `None` if
    /// it would leave the `u64` range
    #[inline]
    pub fn checked_total(&self, added: u64, removed: u64) -> Option<u64> {
        self.total_quantity.checked_sub(removed)?.checked_add(added)
    }

    /// Append an order at the tail of the queue
    pub fn append(&mut self, order: Order, seq: u64, slab: &mut Slab<OrderNode>) -> Locator {
        let quantity = order.quantity;
        let locator = self.queue.push_back(order, seq, slab);
        self.total_quantity += quantity;
        locator
    }

    /// Remove an order by locator
    ///
    /// # Returns
    ///
    /// The removed order, or `None` if the locator no longer resolves
    pub fn remove(&mut self, locator: Locator, slab: &mut Slab<OrderNode>) -> Option<Order> {
        let order = self.queue.remove(locator, slab)?;
        self.total_quantity -= order.quantity;
        Some(order)
    }

    /// Set an order's quantity in place; its queue position is unchanged.
    ///
    /// # Returns
    ///
    /// The previous quantity, or `None` if the locator no longer resolves
    pub fn set_quantity(
        &mut self,
        locator: Locator,
        quantity: u64,
        slab: &mut Slab<OrderNode>,
    ) -> Option<u64> {
        let order = self.queue.get_mut(locator, slab)?;
        let previous = std::mem::replace(&mut order.quantity, quantity);

        self.total_quantity = self.total_quantity - previous + quantity;

        Some(previous)
    }

    /// Set an order's quantity and timestamp and move it to the tail.
    ///
    /// # Returns
    ///
    /// The previous quantity, or `None` if the locator no longer resolves
    pub fn requeue(
        &mut self,
        locator: Locator,
        quantity: u64,
        timestamp: u64,
        slab: &mut Slab<OrderNode>,
    ) -> Option<u64> {
        let previous = self.set_quantity(locator, quantity, slab)?;
        if let Some(order) = self.queue.get_mut(locator, slab) {
            order.timestamp = timestamp;
        }
        self.queue.move_to_back(locator, slab);
        Some(previous)
    }

    /// Borrow an order by locator
    #[inline]
    pub fn get<'a>(&self, locator: Locator, slab: &'a Slab<OrderNode>) -> Option<&'a Order> {
        self.queue.get(locator, slab)
    }

    /// Orders oldest to newest
    #[inline]
    pub fn orders<'a>(&self, slab: &'a Slab<OrderNode>) -> Iter<'a> {
        self.queue.iter(slab)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn price() -> Price {
        Price::from_f64(101.0).unwrap()
    }

    fn order(id: u64, quantity: u64) -> Order {
        Order::new(id, Side::Buy, price(), quantity, id)
    }

    fn ids(level: &PriceLevel, slab: &Slab<OrderNode>) -> Vec<u64> {
        level.orders(slab).map(|o| o.id).collect()
    }

    fn sum(level: &PriceLevel, slab: &Slab<OrderNode>) -> u64 {
        level.orders(slab).map(|o| o.quantity).sum()
    }

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(price());

        assert_eq!(level.price, price());
        assert_eq!(level.total_quantity, 0);
        assert_eq!(level.order_count(), 0);
        assert!(level.is_empty());
    }

    #[test]
    fn test_append_accumulates_quantity() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());

        level.append(order(2, 200), 1, &mut slab);
        level.append(order(5, 100), 2, &mut slab);

        assert_eq!(level.total_quantity, 300);
        assert_eq!(level.order_count(), 2);
        assert_eq!(ids(&level, &slab), vec![2, 5]);
    }

    #[test]
    fn test_remove_adjusts_quantity() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());

        let l2 = level.append(order(2, 200), 1, &mut slab);
        level.append(order(5, 100), 2, &mut slab);

        let removed = level.remove(l2, &mut slab).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(level.total_quantity, 100);
        assert_eq!(level.total_quantity, sum(&level, &slab));

        // Already removed
        assert!(level.remove(l2, &mut slab).is_none());
        assert_eq!(level.total_quantity, 100);
    }

    #[test]
    fn test_set_quantity_in_place() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());

        let l1 = level.append(order(1, 100), 1, &mut slab);
        level.append(order(2, 200), 2, &mut slab);

        assert_eq!(level.set_quantity(l1, 40, &mut slab), Some(100));
        assert_eq!(level.total_quantity, 240);

        assert_eq!(level.set_quantity(l1, 400, &mut slab), Some(40));
        assert_eq!(level.total_quantity, 600);
        assert_eq!(level.total_quantity, sum(&level, &slab));
        assert_eq!(ids(&level, &slab), vec![1, 2]);
    }

    #[test]
    fn test_checked_total() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());
        level.append(order(1, u64::MAX - 10), 1, &mut slab);

        assert_eq!(level.checked_total(10, 0), Some(u64::MAX));
        assert_eq!(level.checked_total(11, 0), None);
        assert_eq!(level.checked_total(20, 15), Some(u64::MAX - 5));
        assert_eq!(level.checked_total(0, u64::MAX), None);
    }

    #[test]
    fn test_requeue_moves_to_tail() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());

        let l1 = level.append(order(1, 100), 1, &mut slab);
        level.append(order(2, 200), 2, &mut slab);

        assert_eq!(level.requeue(l1, 150, 99, &mut slab), Some(100));
        assert_eq!(ids(&level, &slab), vec![2, 1]);
        assert_eq!(level.total_quantity, 350);
        assert_eq!(level.get(l1, &slab).map(|o| o.timestamp), Some(99));
    }

    #[test]
    fn test_remove_only_order_empties_level() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(price());

        let key = level.append(order(1, 100), 1, &mut slab);
        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity, 0);
        assert_eq!(level.orders(&slab).count(), 0);
    }
}
