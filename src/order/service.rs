use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use super::{Order, OrderError, PlacedOrder};
use crate::catalog::{product_lock_key, Product};
use crate::lock::LockManager;
use crate::model::{ModelStore, ModelsExt, WriteBatch};

/// Places orders against the product store, never overselling stock.
///
/// Generic over the document store and the lock backend. Both are handles:
/// clone the store and share the `Arc<L>` with every service that touches
/// product stock.
pub struct OrderService<S, L> {
    store: S,
    locks: Arc<L>,
}

impl<S: ModelStore, L: LockManager> OrderService<S, L> {
    pub fn new(store: S, locks: Arc<L>) -> Self {
        Self { store, locks }
    }

    /// Place an order for `quantity` units of `product_id` on behalf of
    /// `requester_id`.
    ///
    /// `requester_id` comes from the authentication layer and is trusted
    /// as-is; only its presence is checked.
    #[instrument(skip(self), err(level = "debug"))]
    pub fn place_order(
        &self,
        requester_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<PlacedOrder, OrderError> {
        let quantity = validate_quantity(quantity)?;
        if requester_id.trim().is_empty() {
            return Err(OrderError::InvalidRequest("missing requester identity".into()));
        }
        if product_id.trim().is_empty() {
            return Err(OrderError::InvalidRequest("missing product id".into()));
        }

        let _guard = self.locks.acquire(&product_lock_key(product_id))?;

        let products = self.store.models::<Product>();
        let current = products
            .get(product_id)?
            .ok_or_else(|| OrderError::NotFound(product_id.to_string()))?;
        let product = current.data;

        if product.stock < quantity {
            debug!(available = product.stock, "not enough stock");
            return Err(OrderError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }

        let total_price = product
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| OrderError::InvalidRequest("total price overflows".into()))?;

        let remaining_stock = product.stock - quantity;
        let updated = Product {
            stock: remaining_stock,
            ..product
        };
        let order = Order::new(requester_id, product_id, quantity, total_price);

        let batch = WriteBatch::new()
            .update(&updated, current.version)?
            .insert(&order)?;
        self.store.commit(batch).map_err(|e| {
            error!(error = %e, "failed to persist order");
            OrderError::from(e)
        })?;

        info!(order_id = %order.id, %total_price, remaining_stock, "order placed");
        Ok(PlacedOrder {
            order_id: order.id,
            total_price,
            remaining_stock,
        })
    }

    /// Orders placed by `user_id`, newest first.
    pub fn orders_for(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .store
            .models::<Order>()
            .find(&|o: &Order| o.user_id == user_id)?
            .into_iter()
            .map(|v| v.data)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(orders)
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, OrderError> {
    if quantity <= 0 {
        return Err(OrderError::InvalidRequest(
            "quantity must be a positive integer".into(),
        ));
    }
    u32::try_from(quantity)
        .map_err(|_| OrderError::InvalidRequest(format!("quantity {} is too large", quantity)))
}
