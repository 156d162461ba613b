use thiserror::Error;

use crate::lock::LockError;
use crate::model::ModelError;

/// Errors that can occur while placing or listing orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Missing or malformed input. The caller can fix the request.
    #[error("invalid order request: {0}")]
    InvalidRequest(String),
    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(String),
    /// Fewer units in stock than requested.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },
    /// The store or lock backend failed. Safe to retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<ModelError> for OrderError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { id, .. } => OrderError::NotFound(id),
            other => OrderError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<LockError> for OrderError {
    fn from(err: LockError) -> Self {
        OrderError::StorageUnavailable(err.to_string())
    }
}
