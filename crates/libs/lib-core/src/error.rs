//! # Centralized Error Handling
//!
//! [`AppError`] is the error type the workspace binaries report. It wraps the
//! precise [`lib_auth::Error`] so logs keep the exact cause, while
//! [`AppError::user_message`] folds credential failures into one generic
//! message so a caller learns nothing about which check failed.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** - bad input or failed credentials
//!    - [`InvalidInput`](AppError::InvalidInput) → exit code 2
//!    - [`Auth`](AppError::Auth) → exit code 1 (or 70 for internal auth failures)
//!
//! 2. **Server Errors** - configuration or runtime problems
//!    - [`Config`](AppError::Config) → exit code 78
//!    - [`Internal`](AppError::Internal) → exit code 70

use lib_auth::ErrorKind;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password or token check failed, or credential input was malformed.
    #[error("Auth error: {0}")]
    Auth(#[from] lib_auth::Error),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Auth(e) if e.kind() == ErrorKind::Internal => 70,
            AppError::Auth(_) => 1,
            AppError::InvalidInput(_) => 2,
            AppError::Internal(_) => 70,
            AppError::Config(_) => 78,
        }
    }

    /// Get a user-facing error message.
    ///
    /// Credential failures share one message; internal errors are generic.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(e) => match e.kind() {
                ErrorKind::InvalidCredential => "Invalid credentials".to_string(),
                ErrorKind::SignatureMismatch | ErrorKind::Expired => {
                    "Invalid or expired token".to_string()
                }
                ErrorKind::MalformedInput => e.to_string(),
                ErrorKind::Internal => "An internal error occurred".to_string(),
            },
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Log at a level matching the error's origin.
    pub fn log(&self) {
        match self {
            AppError::Auth(e) if e.kind() != ErrorKind::Internal => {
                tracing::warn!(kind = ?e.kind(), "{self}");
            }
            AppError::InvalidInput(_) => tracing::debug!("{self}"),
            _ => tracing::error!("{self}"),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
