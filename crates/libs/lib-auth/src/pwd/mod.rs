//! # Password Hashing
//!
//! Password hashing and verification using PBKDF2-HMAC-SHA512.
//!
//! The stored form is a single string, `<hex-salt>$<hex-derived-key>`, suitable
//! for one text column. Key derivation is deliberately slow (hundreds of
//! milliseconds); async callers should use the `*_async` variants so one hash
//! does not stall the reactor.

mod credential;

pub use credential::{StoredCredential, KEY_LEN, PBKDF2_ROUNDS, SALT_LEN};

use crate::error::{Error, Result};
use lib_utils::{validate_max_length, validate_not_empty};

/// Longest accepted password, in bytes.
pub const PWD_MAX_LEN: usize = 1024;

/// Hash a password under a fresh random salt.
pub fn hash_password(pwd: &str) -> Result<String> {
    check_policy(pwd)?;

    Ok(StoredCredential::derive(pwd).to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch and an error if `stored` is malformed or
/// `pwd` is outside policy.
pub fn verify_password(pwd: &str, stored: &str) -> Result<bool> {
    let cred: StoredCredential = stored.parse()?;
    check_policy(pwd)?;

    Ok(cred.matches(pwd))
}

/// Like [`verify_password`], but a mismatch is [`Error::PwdNotMatching`].
pub fn validate_password(pwd: &str, stored: &str) -> Result<()> {
    if verify_password(pwd, stored)? {
        Ok(())
    } else {
        Err(Error::PwdNotMatching)
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_async(pwd: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&pwd))
        .await
        .map_err(|e| Error::PwdHashTaskFail(e.to_string()))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_async(pwd: String, stored: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&pwd, &stored))
        .await
        .map_err(|e| Error::PwdHashTaskFail(e.to_string()))?
}

fn check_policy(pwd: &str) -> Result<()> {
    validate_not_empty(pwd, "Password").map_err(|_| Error::PwdEmpty)?;
    validate_max_length(pwd, PWD_MAX_LEN, "Password")
        .map_err(|_| Error::PwdTooLong { max: PWD_MAX_LEN })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "TestPassword123!";
        let hash = hash_password(password)
            .expect("Password hashing should succeed for valid password");

        assert!(verify_password(password, &hash)
            .expect("Password verification should succeed for correct password"));
        assert!(!verify_password("WrongPassword", &hash)
            .expect("Password verification should return false for incorrect password"));
    }

    #[test]
    fn test_validate_password() {
        let hash = hash_password("right").expect("hash should succeed");

        assert_eq!(validate_password("right", &hash), Ok(()));
        assert_eq!(validate_password("wrong", &hash), Err(Error::PwdNotMatching));
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(hash_password(""), Err(Error::PwdEmpty));

        let too_long = "a".repeat(PWD_MAX_LEN + 1);
        assert_eq!(
            hash_password(&too_long),
            Err(Error::PwdTooLong { max: PWD_MAX_LEN })
        );
    }

    #[test]
    fn test_verify_malformed_stored_fails_closed() {
        assert_eq!(
            verify_password("anything", "not-a-credential"),
            Err(Error::PwdMalformedStored)
        );
        assert_eq!(verify_password("anything", ""), Err(Error::PwdMalformedStored));
    }

    #[test]
    fn test_verify_out_of_policy_password() {
        let stored = format!("{}${}", "00".repeat(SALT_LEN), "00".repeat(KEY_LEN));

        assert_eq!(verify_password("", &stored), Err(Error::PwdEmpty));
    }

    #[tokio::test]
    async fn test_async_variants() {
        let hash = hash_password_async("async-pwd".to_string())
            .await
            .expect("async hash should succeed");

        assert!(verify_password_async("async-pwd".to_string(), hash.clone())
            .await
            .expect("async verify should succeed"));
        assert!(!verify_password_async("other".to_string(), hash)
            .await
            .expect("async verify should succeed"));
        assert_eq!(
            hash_password_async(String::new()).await,
            Err(Error::PwdEmpty)
        );
    }
}
