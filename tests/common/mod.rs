//! Shared helpers for integration tests.

#![allow(dead_code)]

use lob_core::{Order, OrderBook, Side};

/// Check the cross-structure invariants of `book`:
///
/// - every level's aggregate equals the sum of its orders' quantities
/// - locator entries and queue membership agree one-to-one
/// - no empty level is indexed, and levels are in strict priority order
pub fn assert_invariants(book: &OrderBook) {
    let mut resting = 0;

    for side in [Side::Buy, Side::Sell] {
        let mut previous = None;

        for level in book.levels(side) {
            assert!(!level.is_empty(), "empty {:?} level {} indexed", side, level.price);

            if let Some(previous) = previous {
                match side {
                    Side::Buy => assert!(level.price < previous, "bids out of order"),
                    Side::Sell => assert!(level.price > previous, "asks out of order"),
                }
            }
            previous = Some(level.price);

            let orders: Vec<&Order> = book.orders(level).collect();
            assert_eq!(orders.len(), level.order_count());

            let sum: u64 = orders.iter().map(|o| o.quantity).sum();
            assert_eq!(level.total_quantity, sum, "aggregate mismatch at {}", level.price);

            for order in orders {
                assert!(order.quantity > 0);
                assert_eq!(order.side(), side);
                assert_eq!(order.price(), level.price);

                let entry = book.locate(order.id).expect("queued order has no locator");
                assert_eq!(entry.side, side);
                assert_eq!(entry.price, level.price);

                let located = book.get_order(order.id).expect("locator does not resolve");
                assert!(std::ptr::eq(located, order), "locator resolves to another order");

                resting += 1;
            }
        }
    }

    assert_eq!(resting, book.order_count(), "locator entries without a queued order");
}

/// Order ids of one level, oldest first
pub fn queue_ids(book: &OrderBook, side: Side, price: f64) -> Vec<u64> {
    book.level_orders(side, price).map(|o| o.id).collect()
}
