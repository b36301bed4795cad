//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an optional environment variable.
///
/// Returns `Ok(None)` when the variable is absent, but still fails when it is
/// present and cannot be parsed.
pub fn get_env_opt_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match env::var(name) {
        Ok(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(None),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
