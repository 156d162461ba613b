//! HTTP transport: axum routes over the accounts, catalog and order services.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /`: welcome message.
//! - `GET /health`: `{ "ok": true }`.
//! - `POST /api/register`, `POST /api/login`: accounts.
//! - `GET|POST /api/products`, `GET|DELETE /api/products/:id`: catalog.
//! - `GET|POST /api/orders`: the caller's orders / place an order.
//!
//! Writes require `Authorization: Bearer <token>`. Every error body is
//! `{ "message": "..." }`.
//!
//! Service calls are synchronous and may wait on a product lock or hash a
//! password, so handlers run them on the blocking pool. A blocking task runs
//! to completion even if the client hangs up, so a placement is never cut
//! off between its stock check and its write.
//!
//! ## Example
//!
//! ```ignore
//! let state = AppState::new(InMemoryModelStore::new(), &Config::default());
//! http::serve(state, "127.0.0.1:5050").await?;
//! ```

mod accounts;
mod error;
mod orders;
mod products;

pub use error::ApiError;

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::auth::{Accounts, AuthError, Authenticator, Identity};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::lock::InMemoryLockManager;
use crate::model::InMemoryModelStore;
use crate::order::OrderService;

type Store = InMemoryModelStore;
type Locks = InMemoryLockManager;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<Accounts<Store, Locks>>,
    pub catalog: Arc<Catalog<Store, Locks>>,
    pub orders: Arc<OrderService<Store, Locks>>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Wire every service to one store handle and one lock manager.
    pub fn new(store: InMemoryModelStore, config: &Config) -> Self {
        let locks = Arc::new(InMemoryLockManager::new());
        let accounts = Arc::new(Accounts::new(
            store.clone(),
            Arc::clone(&locks),
            config.token_ttl(),
        ));
        Self {
            authenticator: accounts.clone(),
            accounts,
            catalog: Arc::new(Catalog::new(store.clone(), Arc::clone(&locks))),
            orders: Arc::new(OrderService::new(store, locks)),
        }
    }

    /// Replace the bearer-token resolver.
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Resolve the request's bearer token to an identity.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| AuthError::Unauthorized("missing bearer token".into()))?;
        Ok(self.authenticator.authenticate(token)?)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/products", get(products::list).post(products::create))
        .route("/products/:id", get(products::show).delete(products::remove))
        .route("/orders", get(orders::list).post(orders::place));

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn home_handler() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the storefront API" }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Run a synchronous service call on the blocking pool.
pub(crate) async fn blocking<T, E, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(Into::into)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
