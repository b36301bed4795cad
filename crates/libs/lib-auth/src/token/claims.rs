//! Token claims: an open string-keyed map of scalar values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single claim value.
///
/// Nested arrays or objects are not representable; a payload containing them
/// is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of a number; fractional numbers are floored.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ClaimValue::Null)
    }
}

// region:    --- Froms
impl From<&str> for ClaimValue {
    fn from(val: &str) -> Self {
        ClaimValue::String(val.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(val: String) -> Self {
        ClaimValue::String(val)
    }
}

impl From<bool> for ClaimValue {
    fn from(val: bool) -> Self {
        ClaimValue::Bool(val)
    }
}

impl From<i64> for ClaimValue {
    fn from(val: i64) -> Self {
        ClaimValue::Number(val.into())
    }
}

impl From<u64> for ClaimValue {
    fn from(val: u64) -> Self {
        ClaimValue::Number(val.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for ClaimValue {
    fn from(val: f64) -> Self {
        Number::from_f64(val).map_or(ClaimValue::Null, ClaimValue::Number)
    }
}
// endregion: --- Froms

/// Claims carried by a token, including the registered `iat`/`exp` once issued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, ClaimValue>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ClaimValue> {
        self.0.remove(key)
    }

    /// Subject.
    pub fn sub(&self) -> Option<&str> {
        self.get("sub").and_then(ClaimValue::as_str)
    }

    /// Issued-at, epoch seconds.
    pub fn iat(&self) -> Option<i64> {
        self.get("iat").and_then(ClaimValue::as_i64)
    }

    /// Expiry, epoch seconds.
    pub fn exp(&self) -> Option<i64> {
        self.get("exp").and_then(ClaimValue::as_i64)
    }

    /// True when every entry of `other` is present here with an equal value.
    pub fn contains_all(&self, other: &Claims) -> bool {
        other.iter().all(|(k, v)| self.get(k) == Some(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClaimValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
