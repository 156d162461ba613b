//! Accounts and bearer-token authentication.
//!
//! The order core never sees a token: the transport resolves the bearer
//! token through an [`Authenticator`] and hands the core the resulting
//! [`Identity`]. Any token scheme can be plugged in behind the trait; the
//! built-in one is [`Accounts`], which issues random opaque tokens stored
//! as documents with an expiry.

mod accounts;
mod error;
mod password;
mod user;

pub use accounts::{Accounts, IssuedToken};
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use user::{AccessToken, User};

use serde::Serialize;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: String,
}

/// Resolves a bearer token to the identity it was issued for.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}
