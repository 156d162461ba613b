//! Models - typed documents kept in a schema-flexible document store.
//!
//! Every persisted record (products, orders, users, access tokens) is a
//! `Model`: a serde-serializable struct that knows its collection name and
//! its own identifier. Stores address documents by `"COLLECTION:id"`.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::model::{InMemoryModelStore, Model, ModelsExt, WriteBatch};
//!
//! let store = InMemoryModelStore::new();
//! store.models::<Product>().insert(&product)?;
//! let loaded = store.models::<Product>().get(&product.id)?;
//!
//! // Several writes applied all-or-nothing
//! let batch = WriteBatch::new()
//!     .update(&product, loaded.version)?
//!     .insert(&order)?;
//! store.commit(batch)?;
//! ```

mod batch;
mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as documents.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g. "products", "orders").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Optimistic concurrency conflict (or insert over an existing document).
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Model not found.
    NotFound { collection: String, id: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            ModelError::Serde(msg) => write!(f, "model serialization error: {}", msg),
            ModelError::Storage(msg) => write!(f, "model storage error: {}", msg),
            ModelError::NotFound { collection, id } => {
                write!(f, "model not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serde(err.to_string())
    }
}

/// Storage key for a document: `"COLLECTION:id"`.
pub(crate) fn document_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}

pub use batch::{BatchWrite, WriteBatch, WriteKind};
pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
