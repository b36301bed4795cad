//! # Utilities Library
//!
//! Shared helpers for base64url encoding, environment variables, the clock, and input validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_encode};
pub use envs::{get_env, get_env_opt_parse};
pub use time::now_unix;
pub use validation::{validate_max_length, validate_not_empty};
