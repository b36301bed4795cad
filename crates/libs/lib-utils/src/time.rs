//! # Time Utilities
//!
//! The system clock, as the token codec reads it.

use chrono::Utc;

/// Current time as whole seconds since the Unix epoch.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
