//! Storefront, a small HTTP service for accounts, a product catalog and
//! order placement over a document store.
//!
//! The interesting part is [`order::OrderService::place_order`]: it checks
//! stock, prices the order, decrements inventory and records the order
//! without ever overselling, even when many requests for the same product
//! arrive at once. Everything else is plain CRUD around it.
//!
//! ## Layout
//!
//! - [`model`]: typed documents, the [`model::ModelStore`] trait, atomic
//!   [`model::WriteBatch`] commits and an in-memory store.
//! - [`lock`]: per-key locks that serialize work on one product.
//! - [`catalog`]: products.
//! - [`order`]: order placement and listing.
//! - [`auth`]: registration, login, bearer tokens.
//! - [`config`], [`telemetry`]: environment configuration and tracing.
//! - `http` (feature `http`, on by default): axum routes.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront::{Catalog, InMemoryLockManager, InMemoryModelStore, NewProduct, OrderService};
//!
//! let store = InMemoryModelStore::new();
//! let locks = Arc::new(InMemoryLockManager::new());
//! let catalog = Catalog::new(store.clone(), Arc::clone(&locks));
//! let orders = OrderService::new(store, locks);
//!
//! let laptop = catalog.create_product(new_laptop)?;
//! let placed = orders.place_order("user-1", &laptop.id, 2)?;
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod lock;
pub mod model;
pub mod order;
pub mod telemetry;

#[cfg(feature = "http")]
pub mod http;

pub use auth::{Accounts, AuthError, Authenticator, Identity};
pub use catalog::{Catalog, CatalogError, NewProduct, Product};
pub use config::{Config, ConfigError};
pub use lock::{InMemoryLockManager, LockManager};
pub use model::{InMemoryModelStore, Model, ModelError, ModelStore, ModelsExt, WriteBatch};
pub use order::{Order, OrderError, OrderService, PlacedOrder};
