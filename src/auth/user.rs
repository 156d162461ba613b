use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Model;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

impl Model for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

/// An issued bearer token. The document id is the token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl Model for AccessToken {
    const COLLECTION: &'static str = "access_tokens";

    fn id(&self) -> &str {
        &self.token
    }
}
