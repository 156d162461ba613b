use thiserror::Error;

use crate::lock::LockError;
use crate::model::ModelError;

/// Errors from catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("invalid product: {0}")]
    InvalidRequest(String),
    #[error("product not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { id, .. } => CatalogError::NotFound(id),
            other => CatalogError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<LockError> for CatalogError {
    fn from(err: LockError) -> Self {
        CatalogError::StorageUnavailable(err.to_string())
    }
}
