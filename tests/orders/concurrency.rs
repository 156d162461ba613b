//! Concurrent placements against one product must never oversell.

use std::sync::{Arc, Barrier};
use std::thread;

use storefront::OrderError;

use crate::support::Shop;

/// Fire `requests` unit orders at `product` from separate threads, all
/// released at once. Returns (successes, insufficient-stock failures).
fn race(shop: &Shop, product: &str, requests: usize, quantity: i64) -> (usize, usize) {
    let barrier = Arc::new(Barrier::new(requests));
    let handles: Vec<_> = (0..requests)
        .map(|i| {
            let orders = Arc::clone(&shop.orders);
            let barrier = Arc::clone(&barrier);
            let product = product.to_string();
            thread::spawn(move || {
                barrier.wait();
                orders.place_order(&format!("user-{i}"), &product, quantity)
            })
        })
        .collect();

    let mut ok = 0;
    let mut short = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => ok += 1,
            Err(OrderError::InsufficientStock { .. }) => short += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    (ok, short)
}

#[test]
fn last_unit_goes_to_exactly_one_buyer() {
    let shop = Shop::new();
    let product = shop.stock("10.00", 1);

    let (ok, short) = race(&shop, &product, 2, 1);

    assert_eq!((ok, short), (1, 1));
    assert_eq!(shop.stock_of(&product), 0);
    assert_eq!(shop.orders_for_product(&product).len(), 1);
}

#[test]
fn more_requests_than_stock() {
    let shop = Shop::new();
    let product = shop.stock("2.50", 10);

    let (ok, short) = race(&shop, &product, 32, 1);

    assert_eq!(ok, 10);
    assert_eq!(short, 22);
    assert_eq!(shop.stock_of(&product), 0);
    assert_eq!(shop.total_ordered(&product), 10);
    assert!(shop.locks.is_empty().unwrap());
}

#[test]
fn final_stock_matches_successful_quantities() {
    let shop = Shop::new();
    let product = shop.stock("1.00", 25);

    let (ok, _) = race(&shop, &product, 16, 3);

    // 25 / 3 -> eight orders fit, one unit is left over.
    assert_eq!(ok, 8);
    assert_eq!(shop.stock_of(&product), 25 - 3 * 8);
    assert_eq!(shop.total_ordered(&product), 24);
}

#[test]
fn different_products_do_not_interfere() {
    let shop = Shop::new();
    let a = shop.stock("1.00", 5);
    let b = shop.stock("1.00", 5);

    let shop = Arc::new(shop);
    let handles: Vec<_> = [a.clone(), b.clone()]
        .into_iter()
        .map(|product| {
            let shop = Arc::clone(&shop);
            thread::spawn(move || race(&shop, &product, 8, 1))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), (5, 3));
    }

    assert_eq!(shop.stock_of(&a), 0);
    assert_eq!(shop.stock_of(&b), 0);
    assert!(shop.locks.is_empty().unwrap());
}
