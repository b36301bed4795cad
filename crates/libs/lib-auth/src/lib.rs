//! # Authentication Library
//!
//! Credential primitives: salted password hashing and compact signed bearer tokens.
//!
//! - [`pwd`]: PBKDF2-HMAC-SHA512 password hashes stored as `<hex-salt>$<hex-key>`.
//! - [`token`]: `header.payload.signature` tokens signed with HMAC-SHA256.
//!
//! Both are pure functions of their inputs (plus the OS random source and the
//! clock), so they can be called concurrently without coordination.

pub mod config;
pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::{Error, ErrorKind, Result};
pub use pwd::{
    hash_password, hash_password_async, validate_password, verify_password,
    verify_password_async, StoredCredential,
};
pub use token::{inspect, issue, issue_at, verify, verify_at, ClaimValue, Claims, TokenKey};
