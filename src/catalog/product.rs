use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CatalogError;
use crate::model::Model;

/// A product document.
///
/// `stock` is unsigned, so a negative stock level is unrepresentable; order
/// placement additionally refuses any decrement larger than the stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

impl Model for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidRequest("name must not be empty".into()));
        }
        if self.price < Decimal::ZERO {
            return Err(CatalogError::InvalidRequest(
                "price must not be negative".into(),
            ));
        }
        Ok(())
    }
}

impl From<NewProduct> for Product {
    fn from(new: NewProduct) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new.description,
            price: new.price,
            stock: new.stock,
            created_at: Utc::now(),
        }
    }
}
