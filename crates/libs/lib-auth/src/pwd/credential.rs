//! Stored password credential: `<hex-salt>$<hex-derived-key>`.

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 64;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 100_000;

const DELIMITER: char = '$';

/// A persisted password hash.
///
/// Immutable once created; a password change derives a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    salt: [u8; SALT_LEN],
    derived_key: [u8; KEY_LEN],
}

impl StoredCredential {
    /// Derive a credential for `pwd` under a fresh random salt.
    ///
    /// The caller is responsible for enforcing password policy first.
    pub(crate) fn derive(pwd: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        Self {
            derived_key: derive_key(pwd, &salt),
            salt,
        }
    }

    /// Recompute the key for `pwd` under this salt and compare in constant time.
    pub(crate) fn matches(&self, pwd: &str) -> bool {
        let candidate = derive_key(pwd, &self.salt);
        candidate[..].ct_eq(&self.derived_key[..]).into()
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}

/// PBKDF2-HMAC-SHA512 over the password and the lower-case hex text of the salt.
///
/// Feeding the hex text rather than the raw salt bytes keeps existing
/// `<hex-salt>$<hex-key>` records verifiable.
fn derive_key(pwd: &str, salt: &[u8; SALT_LEN]) -> [u8; KEY_LEN] {
    let salt_hex = hex::encode(salt);
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(pwd.as_bytes(), salt_hex.as_bytes(), PBKDF2_ROUNDS, &mut key);
    key
}

impl fmt::Display for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}",
            hex::encode(self.salt),
            hex::encode(self.derived_key)
        )
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("salt", &hex::encode(self.salt))
            .field("derived_key", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for StoredCredential {
    type Err = Error;

    fn from_str(stored: &str) -> Result<Self> {
        let (salt_hex, key_hex) = stored
            .split_once(DELIMITER)
            .ok_or(Error::PwdMalformedStored)?;

        let salt = decode_fixed::<SALT_LEN>(salt_hex)?;
        let derived_key = decode_fixed::<KEY_LEN>(key_hex)?;

        Ok(Self { salt, derived_key })
    }
}

/// Lower-case hex only: the KDF salts with the lower-case text, so an
/// upper-case record would parse and then never match.
fn decode_fixed<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    if hex_str.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(Error::PwdMalformedStored);
    }
    let bytes = hex::decode(hex_str).map_err(|_| Error::PwdMalformedStored)?;
    bytes.try_into().map_err(|_| Error::PwdMalformedStored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_shape() {
        let cred = StoredCredential::derive("hunter2");
        let stored = cred.to_string();

        let (salt_hex, key_hex) = stored.split_once('$').expect("delimiter present");
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
        assert_eq!(key_hex.len(), KEY_LEN * 2);
        assert!(stored.chars().all(|c| c == '$' || c.is_ascii_hexdigit()));

        let parsed: StoredCredential = stored.parse().expect("own output parses");
        assert_eq!(parsed, cred);
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        let salt = "00".repeat(SALT_LEN);
        let key = "ab".repeat(KEY_LEN);

        let cases = [
            String::new(),
            "no-delimiter".to_string(),
            format!("{salt}{key}"),
            format!("{salt}$"),
            format!("$${key}"),
            format!("zz{}${key}", &salt[2..]),
            format!("{}${key}", &salt[2..]),
            format!("{salt}${}", &key[2..]),
            format!("{salt}${key}$"),
        ];

        for case in cases {
            assert_eq!(
                case.parse::<StoredCredential>(),
                Err(Error::PwdMalformedStored),
                "case: {case:?}"
            );
        }
    }

    #[test]
    fn test_matches_record_from_node_service() {
        // crypto.pbkdf2Sync('correct horse', salt, 100000, 64, 'sha512')
        let stored = "2d6e5e07382e9a2c08913b9cc51c43fb$\
            fcb0a788da29d89d2504ffa99dd4ee4346bc49b677f8420b34e6494f1a5f4142\
            fc928a5d98d1954662634972157c6de606b31741c7da848c394d33ec5fe054fa";

        let cred: StoredCredential = stored.parse().expect("record parses");
        assert!(cred.matches("correct horse"));
        assert!(!cred.matches("correct horsf"));
        assert_eq!(cred.to_string(), stored);
    }

    #[test]
    fn test_upper_case_hex_rejected() {
        let stored = "2D6E5E07382E9A2C08913B9CC51C43FB$\
            fcb0a788da29d89d2504ffa99dd4ee4346bc49b677f8420b34e6494f1a5f4142\
            fc928a5d98d1954662634972157c6de606b31741c7da848c394d33ec5fe054fa";
        assert_eq!(
            stored.parse::<StoredCredential>(),
            Err(Error::PwdMalformedStored)
        );

        let upper_key = format!("{}${}", "00".repeat(SALT_LEN), "AB".repeat(KEY_LEN));
        assert_eq!(
            upper_key.parse::<StoredCredential>(),
            Err(Error::PwdMalformedStored)
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let cred = StoredCredential::derive("pwd");
        let debug = format!("{cred:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&hex::encode(cred.derived_key)));
    }
}
