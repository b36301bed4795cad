//! # Signed Token Management
//!
//! Compact bearer tokens of the form `header.payload.signature`, each segment
//! base64url without padding, signed with HMAC-SHA256. The layout matches
//! HS256 JWTs, so tokens can travel in an `Authorization: Bearer` header and
//! interoperate with standard JWT libraries.
//!
//! Verification is a single decision with four outcomes: valid claims,
//! [`Error::TokenMalformed`], [`Error::TokenSignatureMismatch`], or
//! [`Error::TokenExpired`]. The signature is checked before any payload byte
//! is trusted.

mod claims;
mod key;

pub use claims::{ClaimValue, Claims};
pub use key::TokenKey;

use crate::error::{Error, Result};
use lib_utils::{b64u_decode, b64u_encode, now_unix};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Signature algorithm advertised in the header.
pub const TOKEN_ALG: &str = "HS256";

/// Token type advertised in the header.
pub const TOKEN_TYP: &str = "JWT";

/// Default time-to-live: 30 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: TOKEN_ALG.to_string(),
            typ: Some(TOKEN_TYP.to_string()),
        }
    }
}

/// The three segments of a token, borrowed from the input.
struct TokenParts<'a> {
    signing_input: &'a str,
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> TokenParts<'a> {
    fn parse(token: &'a str) -> Result<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments[..] else {
            return Err(Error::TokenMalformed("expected three segments"));
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(Error::TokenMalformed("empty segment"));
        }

        Ok(Self {
            signing_input: &token[..header.len() + 1 + payload.len()],
            header,
            payload,
            signature,
        })
    }
}

// region:    --- Issue

/// Issue a token for `claims`, valid for `ttl_secs` from now.
pub fn issue(claims: &Claims, key: &TokenKey, ttl_secs: i64) -> Result<String> {
    issue_at(claims, key, ttl_secs, now_unix())
}

/// Issue a token as of `now` (epoch seconds).
///
/// `iat` and `exp` are always set by the issuer; caller-supplied values for
/// them are overwritten. A non-positive `ttl_secs` yields an already-expired
/// token.
pub fn issue_at(claims: &Claims, key: &TokenKey, ttl_secs: i64, now: i64) -> Result<String> {
    let mut payload = claims.clone();
    payload.insert("iat", now);
    payload.insert("exp", now.saturating_add(ttl_secs));

    let header_b64 = encode_segment(&TokenHeader::hs256())?;
    let payload_b64 = encode_segment(&payload)?;
    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature_b64 = b64u_encode(key.sign(signing_input.as_bytes())?);

    Ok(format!("{signing_input}.{signature_b64}"))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(|e| Error::TokenEncode(e.to_string()))?;
    Ok(b64u_encode(json))
}

// endregion: --- Issue

// region:    --- Verify

/// Verify a token against `key` and the current clock.
pub fn verify(token: &str, key: &TokenKey) -> Result<Claims> {
    verify_at(token, key, now_unix())
}

/// Verify a token as of `now` (epoch seconds).
///
/// A token whose `exp` equals `now` is still valid; it expires once `exp < now`.
pub fn verify_at(token: &str, key: &TokenKey, now: i64) -> Result<Claims> {
    let res = verify_parts(token, key, now);
    if let Err(err) = &res {
        debug!(kind = ?err.kind(), "token rejected: {err}");
    }
    res
}

fn verify_parts(token: &str, key: &TokenKey, now: i64) -> Result<Claims> {
    let parts = TokenParts::parse(token)?;

    let expected = b64u_encode(key.sign(parts.signing_input.as_bytes())?);
    if !bool::from(expected.as_bytes().ct_eq(parts.signature.as_bytes())) {
        return Err(Error::TokenSignatureMismatch);
    }

    let header: TokenHeader = decode_segment(parts.header, Segment::Header)?;
    if header.alg != TOKEN_ALG {
        return Err(Error::TokenUnsupportedAlg);
    }

    let claims: Claims = decode_segment(parts.payload, Segment::Payload)?;

    if let Some(exp) = deadline(&claims)? {
        if exp < now {
            return Err(Error::TokenExpired { exp, now });
        }
    }

    Ok(claims)
}

/// Decode the payload without checking the signature or expiry.
///
/// For diagnostics only. The result must never be used to authorize anything.
pub fn inspect(token: &str) -> Result<Claims> {
    let parts = TokenParts::parse(token)?;
    decode_segment(parts.payload, Segment::Payload)
}

#[derive(Clone, Copy)]
enum Segment {
    Header,
    Payload,
}

fn decode_segment<T: DeserializeOwned>(segment: &str, which: Segment) -> Result<T> {
    let (not_b64u, not_json) = match which {
        Segment::Header => ("header is not base64url", "header is not a JSON object"),
        Segment::Payload => ("payload is not base64url", "payload is not a flat JSON object"),
    };

    let bytes = b64u_decode(segment).map_err(|_| Error::TokenMalformed(not_b64u))?;
    serde_json::from_slice(&bytes).map_err(|_| Error::TokenMalformed(not_json))
}

/// `exp`, if present. A present but non-numeric `exp` is malformed.
fn deadline(claims: &Claims) -> Result<Option<i64>> {
    match claims.get("exp") {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or(Error::TokenMalformed("exp is not a number")),
    }
}

// endregion: --- Verify
