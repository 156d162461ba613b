//! Product catalog.
//!
//! Products live in the `products` collection. Stock is only ever reduced by
//! order placement; deleting a product takes the same per-product lock so a
//! delete cannot land in the middle of a placement.

mod error;
mod product;

pub use error::CatalogError;
pub use product::{NewProduct, Product};

use std::sync::Arc;

use tracing::{info, instrument};

use crate::lock::LockManager;
use crate::model::{Model, ModelStore, ModelsExt};

/// Lock key serializing every stock-affecting operation on one product.
pub fn product_lock_key(product_id: &str) -> String {
    format!("{}:{}", Product::COLLECTION, product_id)
}

/// Product listing, lookup, creation and removal.
pub struct Catalog<S, L> {
    store: S,
    locks: Arc<L>,
}

impl<S: ModelStore, L: LockManager> Catalog<S, L> {
    pub fn new(store: S, locks: Arc<L>) -> Self {
        Self { store, locks }
    }

    /// Every product, oldest first.
    pub fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products: Vec<Product> = self
            .store
            .models::<Product>()
            .all()?
            .into_iter()
            .map(|v| v.data)
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        self.store
            .models::<Product>()
            .get(id)?
            .map(|v| v.data)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, new), fields(name = %new.name, stock = new.stock))]
    pub fn create_product(&self, new: NewProduct) -> Result<Product, CatalogError> {
        new.validate()?;
        let product = Product::from(new);
        self.store.models::<Product>().insert(&product)?;
        info!(product_id = %product.id, "product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub fn delete_product(&self, id: &str) -> Result<(), CatalogError> {
        let _guard = self.locks.acquire(&product_lock_key(id))?;
        if !self.store.models::<Product>().delete(id)? {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }
}
