//! HTTP integration tests.
//!
//! Starts an axum server on an ephemeral port and exercises it with reqwest.

#![cfg(feature = "http")]

mod accounts;
mod products;
mod orders;
