//! # Auth Errors
//!
//! One variant per concrete failure cause, so callers and tests can tell them
//! apart. [`Error::kind`] folds them into the coarse categories an outer layer
//! maps to responses.
//!
//! Display strings never include passwords, key material, or token contents.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // -- Key
    #[error("Token key cannot be empty")]
    KeyEmpty,

    // -- Pwd
    #[error("Password cannot be empty")]
    PwdEmpty,

    #[error("Password must be at most {max} bytes")]
    PwdTooLong { max: usize },

    #[error("Stored credential is malformed")]
    PwdMalformedStored,

    #[error("Password does not match")]
    PwdNotMatching,

    #[error("Password hashing task failed: {0}")]
    PwdHashTaskFail(String),

    // -- Token
    #[error("Token is malformed: {0}")]
    TokenMalformed(&'static str),

    #[error("Token signature mismatch")]
    TokenSignatureMismatch,

    #[error("Token expired at {exp} (now {now})")]
    TokenExpired { exp: i64, now: i64 },

    #[error("Token algorithm not supported")]
    TokenUnsupportedAlg,

    #[error("Failed to encode token: {0}")]
    TokenEncode(String),

    // -- Config
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad token structure, bad stored-credential structure, or input outside policy.
    MalformedInput,
    /// Tampered token or wrong secret.
    SignatureMismatch,
    /// Valid signature, past its deadline.
    Expired,
    /// Password does not match the stored hash.
    InvalidCredential,
    /// Configuration or runtime failure unrelated to the input.
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PwdEmpty
            | Error::PwdTooLong { .. }
            | Error::PwdMalformedStored
            | Error::TokenMalformed(_)
            | Error::TokenUnsupportedAlg => ErrorKind::MalformedInput,
            Error::TokenSignatureMismatch => ErrorKind::SignatureMismatch,
            Error::TokenExpired { .. } => ErrorKind::Expired,
            Error::PwdNotMatching => ErrorKind::InvalidCredential,
            Error::KeyEmpty
            | Error::PwdHashTaskFail(_)
            | Error::TokenEncode(_)
            | Error::Config(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::TokenMalformed("x").kind(), ErrorKind::MalformedInput);
        assert_eq!(Error::PwdMalformedStored.kind(), ErrorKind::MalformedInput);
        assert_eq!(Error::TokenSignatureMismatch.kind(), ErrorKind::SignatureMismatch);
        assert_eq!(
            Error::TokenExpired { exp: 1, now: 2 }.kind(),
            ErrorKind::Expired
        );
        assert_eq!(Error::PwdNotMatching.kind(), ErrorKind::InvalidCredential);
        assert_eq!(Error::KeyEmpty.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_display_is_precise() {
        assert_eq!(
            Error::TokenExpired { exp: 10, now: 20 }.to_string(),
            "Token expired at 10 (now 20)"
        );
        assert_eq!(
            Error::PwdTooLong { max: 1024 }.to_string(),
            "Password must be at most 1024 bytes"
        );
    }
}
