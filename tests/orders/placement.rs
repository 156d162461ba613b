//! Sequential placement behaviour.

use storefront::OrderError;

use crate::support::{dec, Shop};

#[test]
fn two_laptops_at_1500_99() {
    let shop = Shop::new();
    let laptop = shop.stock("1500.99", 5);

    let placed = shop.orders.place_order("user-1", &laptop, 2).unwrap();

    assert_eq!(placed.total_price, dec("3001.98"));
    assert_eq!(shop.stock_of(&laptop), 3);

    let orders = shop.orders_for_product(&laptop);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, placed.order_id);
    assert_eq!(orders[0].total_price, dec("1500.99") * dec("2"));
}

#[test]
fn stock_drains_then_rejects() {
    let shop = Shop::new();
    let product = shop.stock("9.50", 3);

    shop.orders.place_order("user-1", &product, 2).unwrap();
    shop.orders.place_order("user-2", &product, 1).unwrap();
    let err = shop.orders.place_order("user-3", &product, 1).unwrap_err();

    assert!(matches!(err, OrderError::InsufficientStock { available: 0, .. }));
    assert_eq!(shop.stock_of(&product), 0);
    assert_eq!(shop.total_ordered(&product), 3);
}

#[test]
fn rejected_orders_write_nothing() {
    let shop = Shop::new();
    let product = shop.stock("1.00", 2);
    let documents_before = shop.store.len().unwrap();

    assert!(matches!(
        shop.orders.place_order("user-1", &product, 3),
        Err(OrderError::InsufficientStock { .. })
    ));
    assert!(matches!(
        shop.orders.place_order("user-1", &product, 0),
        Err(OrderError::InvalidRequest(_))
    ));
    assert!(matches!(
        shop.orders.place_order("user-1", "no-such-product", 1),
        Err(OrderError::NotFound(_))
    ));

    assert_eq!(shop.store.len().unwrap(), documents_before);
    assert_eq!(shop.stock_of(&product), 2);
}

#[test]
fn deleted_product_cannot_be_ordered() {
    let shop = Shop::new();
    let product = shop.stock("1.00", 2);
    shop.catalog.delete_product(&product).unwrap();

    assert!(matches!(
        shop.orders.place_order("user-1", &product, 1),
        Err(OrderError::NotFound(_))
    ));
}

#[test]
fn price_is_fixed_at_order_time() {
    let shop = Shop::new();
    let product = shop.stock("0.10", 10);

    let placed = shop.orders.place_order("user-1", &product, 3).unwrap();

    assert_eq!(placed.total_price.to_string(), "0.30");
}
