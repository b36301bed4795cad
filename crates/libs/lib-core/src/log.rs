//! # Logging
//!
//! `tracing` subscriber setup. `RUST_LOG` wins when set; otherwise `LOG_LEVEL`
//! (default `info`) picks the level. Output goes to stderr so command output
//! on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Resolve a `LOG_LEVEL` value, falling back to `info` for unknown values.
pub fn level_filter(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Install the global tracing subscriber.
///
/// `default_level` applies when neither `RUST_LOG` nor `LOG_LEVEL` is set.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(&level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("DEBUG"), "debug");
        assert_eq!(level_filter("warn"), "warn");
        assert_eq!(level_filter("verbose"), "info");
        assert_eq!(level_filter(""), "info");
    }
}
