//! # Application Configuration
//!
//! Configuration is loaded from `.env` (if present) and the process
//! environment, then validated, so a misconfigured process fails at startup
//! rather than on its first request.
//!
//! ## Global Config Access
//!
//! Call [`init_config()`] once at startup, then [`core_config()`] anywhere:
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! fn main() -> lib_core::Result<()> {
//!     init_config()?;
//!     let ttl = core_config()?.auth.token_ttl_secs;
//!     # let _ = ttl;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use lib_auth::AuthConfig;
use tracing::debug;

use crate::error::{AppError, Result};

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Token signing secret and lifetime.
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let auth = AuthConfig::from_env().map_err(config_error)?;
        Ok(Self { auth })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate().map_err(config_error)
    }

    /// Read `.env` into the environment, then load and validate.
    pub fn load() -> Result<Self> {
        if let Some(path) = load_dotenv()? {
            debug!("loaded environment from {}", path.display());
        }

        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Read `.env` from the working directory or its parents into the environment.
///
/// Variables already set in the process win. A missing file is `Ok(None)`; a
/// file that exists but cannot be read or parsed is an error.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    dotenv_outcome(dotenvy::dotenv())
}

fn dotenv_outcome(res: std::result::Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>> {
    match res {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(AppError::Config(format!("Failed to load .env: {e}"))),
    }
}

fn config_error(err: lib_auth::Error) -> AppError {
    match err {
        lib_auth::Error::Config(msg) => AppError::Config(msg),
        other => AppError::Auth(other),
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate, and install the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - `JWT_SECRET` is missing or too short
/// - `JWT_TTL_SECS` is malformed or out of range
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::load()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;

    core_config()
}

/// Get a reference to the global configuration.
///
/// Fails if [`init_config()`] has not been called yet.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or_else(|| {
        AppError::Config("Config must be initialized with init_config() before use".to_string())
    })
}
