//! # Auth Configuration
//!
//! Signing secret and token lifetime, loaded from the environment.
//!
//! The secret is mandatory: a missing `JWT_SECRET` is a startup error, and
//! there is no built-in fallback value.

use crate::error::{Error, Result};
use crate::token::{TokenKey, DEFAULT_TOKEN_TTL_SECS};
use lib_utils::envs::{get_env, get_env_opt_parse};

/// Shortest accepted signing secret, in bytes.
pub const MIN_TOKEN_KEY_LEN: usize = 32;

/// Longest accepted token lifetime.
pub const MAX_TOKEN_TTL_SECS: i64 = DEFAULT_TOKEN_TTL_SECS;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Secret for token signing and verification (`JWT_SECRET`).
    pub token_key: TokenKey,

    /// Token validity period in seconds (`JWT_TTL_SECS`, default 30 days).
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let secret = get_env("JWT_SECRET")
            .map_err(|_| Error::Config("JWT_SECRET must be set in environment".to_string()))?;

        let token_ttl_secs = get_env_opt_parse::<i64>("JWT_TTL_SECS")
            .map_err(|_| Error::Config("JWT_TTL_SECS must be a valid number".to_string()))?
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Ok(Self {
            token_key: TokenKey::new(secret.into_bytes())
                .map_err(|_| Error::Config("JWT_SECRET cannot be empty".to_string()))?,
            token_ttl_secs,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.token_key.len() < MIN_TOKEN_KEY_LEN {
            return Err(Error::Config(format!(
                "JWT_SECRET must be at least {MIN_TOKEN_KEY_LEN} bytes long"
            )));
        }

        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(Error::Config(format!(
                "JWT_TTL_SECS must be between 1 and {MAX_TOKEN_TTL_SECS} (30 days)"
            )));
        }

        Ok(())
    }
}
