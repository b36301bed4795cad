//! Signing key for tokens.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Server-held secret used to sign and verify tokens.
///
/// `Debug` never prints the key bytes.
#[derive(Clone)]
pub struct TokenKey(Vec<u8>);

impl TokenKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::KeyEmpty);
        }
        Ok(Self(bytes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// HMAC-SHA256 of `content` under this key.
    pub(crate) fn sign(&self, content: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| Error::TokenEncode(e.to_string()))?;
        mac.update(content);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenKey([REDACTED; {} bytes])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(TokenKey::new(Vec::new()), Err(Error::KeyEmpty)));
        assert!(matches!(TokenKey::new(""), Err(Error::KeyEmpty)));
    }

    #[test]
    fn test_debug_redacts() {
        let key = TokenKey::new("super-secret-value").expect("key");

        let debug = format!("{key:?}");
        assert_eq!(debug, "TokenKey([REDACTED; 18 bytes])");
    }

    #[test]
    fn test_sign_rfc4231_case_2() {
        // RFC 4231 test case 2.
        let key = TokenKey::new("Jefe").expect("key");
        let mac = key
            .sign(b"what do ya want for nothing?")
            .expect("sign");

        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
