use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Model;

/// An order document. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn new(
        user_id: &str,
        product_id: &str,
        quantity: u32,
        total_price: Decimal,
    ) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            total_price,
            created_at: Utc::now(),
        }
    }
}

impl Model for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
    pub order_id: String,
    pub total_price: Decimal,
    pub remaining_stock: u32,
}
