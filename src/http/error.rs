use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::order::OrderError;

/// Every error a handler can return, mapped to a status code and a
/// `{ "message": ... }` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => match e {
                OrderError::InvalidRequest(_) | OrderError::InsufficientStock { .. } => {
                    StatusCode::BAD_REQUEST
                }
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Catalog(e) => match e {
                CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Auth(e) => match e {
                AuthError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                AuthError::UsernameTaken(_) => StatusCode::CONFLICT,
                AuthError::InvalidCredentials | AuthError::Unauthorized(_) => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side failures are not echoed back.
    pub fn message(&self) -> String {
        match self {
            ApiError::Order(OrderError::InsufficientStock { .. }) => "Not enough stock".into(),
            ApiError::Auth(AuthError::Hashing(_)) | ApiError::Internal(_) => {
                "Internal server error".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
