use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{blocking, ApiError, AppState};

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(alias = "productId")]
    pub product_id: String,
    pub quantity: i64,
}

/// `POST /api/orders` (authenticated)
pub async fn place(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state.authenticate(&headers)?;
    let Json(request) = payload?;

    let orders = Arc::clone(&state.orders);
    let placed = blocking(move || {
        orders.place_order(&identity.user_id, &request.product_id, request.quantity)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order placed successfully",
            "order_id": placed.order_id,
            "total_price": placed.total_price,
            "remaining_stock": placed.remaining_stock,
        })),
    ))
}

/// `GET /api/orders` (authenticated), the caller's own orders.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state.authenticate(&headers)?;

    let orders = Arc::clone(&state.orders);
    let mine = blocking(move || orders.orders_for(&identity.user_id)).await?;
    Ok(Json(mine))
}
