use thiserror::Error;

use crate::lock::LockError;
use crate::model::ModelError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<ModelError> for AuthError {
    fn from(err: ModelError) -> Self {
        AuthError::StorageUnavailable(err.to_string())
    }
}

impl From<LockError> for AuthError {
    fn from(err: LockError) -> Self {
        AuthError::StorageUnavailable(err.to_string())
    }
}
