use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{hash_password, verify_password, AccessToken, AuthError, Authenticator, Identity, User};
use crate::lock::LockManager;
use crate::model::{Model, ModelStore, ModelsExt};

const TOKEN_BYTES: usize = 32;

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Registration, login and token resolution over the document store.
pub struct Accounts<S, L> {
    store: S,
    locks: Arc<L>,
    token_ttl: TimeDelta,
}

impl<S: ModelStore, L: LockManager> Accounts<S, L> {
    pub fn new(store: S, locks: Arc<L>, token_ttl: TimeDelta) -> Self {
        Self {
            store,
            locks,
            token_ttl,
        }
    }

    /// Create an account. Usernames are unique.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidRequest(
                "username and password are required".into(),
            ));
        }

        // Check-then-insert on the username must not interleave.
        let _guard = self
            .locks
            .acquire(&format!("{}:username:{}", User::COLLECTION, username))?;
        if self.find_user(username)?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };
        self.store.models::<User>().insert(&user)?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check credentials and issue a bearer token.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidRequest(
                "username and password are required".into(),
            ));
        }

        let user = self
            .find_user(username)?
            .ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash)? {
            debug!("wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let tokens = self.store.models::<AccessToken>();
        let expired = tokens.find(&|t: &AccessToken| t.user_id == user.id && t.is_expired(now))?;
        for stale in &expired {
            tokens.delete(&stale.data.token)?;
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "purged expired tokens");
        }

        let token = AccessToken {
            token: generate_token(),
            user_id: user.id,
            expires_at: now + self.token_ttl,
        };
        tokens.insert(&token)?;

        info!(user_id = %token.user_id, "token issued");
        Ok(IssuedToken {
            access_token: token.token,
            expires_at: token.expires_at,
        })
    }

    fn find_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .store
            .models::<User>()
            .find(&|u: &User| u.username == username)?
            .into_iter()
            .next()
            .map(|v| v.data))
    }
}

impl<S: ModelStore, L: LockManager> Authenticator for Accounts<S, L> {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Unauthorized("missing token".into()));
        }
        let tokens = self.store.models::<AccessToken>();
        let stored = tokens
            .get(token)?
            .ok_or_else(|| AuthError::Unauthorized("invalid token".into()))?
            .data;

        if stored.is_expired(Utc::now()) {
            tokens.delete(token)?;
            return Err(AuthError::Unauthorized("token expired".into()));
        }

        Ok(Identity {
            user_id: stored.user_id,
        })
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
