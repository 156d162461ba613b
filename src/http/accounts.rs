use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{blocking, ApiError, AppState};

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = payload?;
    let accounts = Arc::clone(&state.accounts);
    let user =
        blocking(move || accounts.register(&credentials.username, &credentials.password)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "id": user.id })),
    ))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = payload?;
    let accounts = Arc::clone(&state.accounts);
    let issued =
        blocking(move || accounts.login(&credentials.username, &credentials.password)).await?;

    Ok(Json(issued))
}
