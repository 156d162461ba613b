//! Environment configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_HOST` | `127.0.0.1` |
//! | `STOREFRONT_PORT` | `5050` |
//! | `STOREFRONT_TOKEN_TTL_SECS` | `900` |

use std::{env, fmt::Display, str::FromStr};

use chrono::TimeDelta;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_TOKEN_TTL_SECS: u32 = 15 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub token_ttl_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: load(&lookup, "STOREFRONT_HOST", defaults.host)?,
            port: load(&lookup, "STOREFRONT_PORT", defaults.port)?,
            token_ttl_secs: load(&lookup, "STOREFRONT_TOKEN_TTL_SECS", defaults.token_ttl_secs)?,
        })
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_ttl(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.token_ttl_secs))
    }
}

fn load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
