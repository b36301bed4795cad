//! # Core Library
//!
//! Application configuration, error handling, and logging setup shared by the
//! workspace binaries.

pub mod config;
pub mod error;
pub mod log;

// Re-export commonly used types
pub use config::{core_config, init_config, Config};
pub use error::{AppError, Result};
pub use log::init_tracing;
