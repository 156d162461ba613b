use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::{blocking, ApiError, AppState};
use crate::catalog::NewProduct;

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let products = blocking(move || catalog.list_products()).await?;
    Ok(Json(products))
}

/// `GET /api/products/:id`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let product = blocking(move || catalog.get_product(&id)).await?;
    Ok(Json(product))
}

/// `POST /api/products` (authenticated)
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    state.authenticate(&headers)?;
    let Json(new) = payload?;

    let catalog = Arc::clone(&state.catalog);
    let product = blocking(move || catalog.create_product(new)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "id": product.id })),
    ))
}

/// `DELETE /api/products/:id` (authenticated)
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.authenticate(&headers)?;

    let catalog = Arc::clone(&state.catalog);
    blocking(move || catalog.delete_product(&id)).await?;

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
