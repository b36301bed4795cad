//! Command implementations. Each returns the text printed on success.

use std::io::{self, BufRead};

use lib_auth::{
    hash_password, inspect, issue, validate_password, verify, ClaimValue, Claims, TokenKey,
};
use lib_core::{init_config, AppError, Result};
use tracing::info;

use crate::Commands;

pub fn run(command: Commands) -> Result<String> {
    match command {
        Commands::HashPwd { password } => {
            let pwd = password_or_stdin(password)?;
            hash_pwd(&pwd)
        }
        Commands::VerifyPwd { stored, password } => {
            let pwd = password_or_stdin(password)?;
            verify_pwd(&pwd, &stored)
        }
        Commands::Issue { claims, ttl } => {
            let config = init_config()?;
            let ttl = ttl.unwrap_or(config.auth.token_ttl_secs);
            issue_token(claims, &config.auth.token_key, ttl)
        }
        Commands::Verify { token } => {
            let config = init_config()?;
            verify_token(&token, &config.auth.token_key)
        }
        Commands::Inspect { token } => inspect_token(&token),
    }
}

pub fn hash_pwd(pwd: &str) -> Result<String> {
    Ok(hash_password(pwd)?)
}

pub fn verify_pwd(pwd: &str, stored: &str) -> Result<String> {
    validate_password(pwd, stored)?;
    Ok("ok".to_string())
}

pub fn issue_token(claims: Vec<(String, ClaimValue)>, key: &TokenKey, ttl: i64) -> Result<String> {
    let claims = claims
        .into_iter()
        .fold(Claims::new(), |acc, (k, v)| acc.with(k, v));

    let token = issue(&claims, key, ttl)?;
    info!(claims = claims.len(), ttl, "issued token");
    Ok(token)
}

pub fn verify_token(token: &str, key: &TokenKey) -> Result<String> {
    let claims = verify(token, key)?;
    Ok(serde_json::to_string_pretty(&claims)?)
}

pub fn inspect_token(token: &str) -> Result<String> {
    let claims = inspect(token)?;
    Ok(serde_json::to_string_pretty(&claims)?)
}

/// Parse `key=value`. Values are read as `null`, a boolean, an integer, or a
/// finite float, and otherwise kept as a string.
pub fn parse_claim(raw: &str) -> std::result::Result<(String, ClaimValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;

    if key.is_empty() {
        return Err("claim key cannot be empty".to_string());
    }

    let value = match value {
        "null" => ClaimValue::Null,
        "true" => ClaimValue::Bool(true),
        "false" => ClaimValue::Bool(false),
        _ => {
            if let Ok(int) = value.parse::<i64>() {
                ClaimValue::from(int)
            } else {
                match value.parse::<f64>() {
                    Ok(float) if float.is_finite() => ClaimValue::from(float),
                    _ => ClaimValue::from(value),
                }
            }
        }
    };

    Ok((key.to_string(), value))
}

fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(pwd) = password {
        return Ok(pwd);
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(format!("Failed to read password from stdin: {e}")))?;

    let pwd = line.trim_end_matches(['\r', '\n']).to_string();
    if pwd.is_empty() {
        return Err(AppError::InvalidInput("No password given".to_string()));
    }
    Ok(pwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> TokenKey {
        TokenKey::new("cli-test-secret-key-at-least-32-bytes").expect("key")
    }

    #[test]
    fn test_parse_claim_values() {
        assert_eq!(parse_claim("sub=u1"), Ok(("sub".into(), ClaimValue::from("u1"))));
        assert_eq!(parse_claim("admin=true"), Ok(("admin".into(), ClaimValue::Bool(true))));
        assert_eq!(parse_claim("n=-3"), Ok(("n".into(), ClaimValue::from(-3i64))));
        assert_eq!(parse_claim("r=0.5"), Ok(("r".into(), ClaimValue::from(0.5))));
        assert_eq!(parse_claim("x=null"), Ok(("x".into(), ClaimValue::Null)));
        assert_eq!(parse_claim("x=NaN"), Ok(("x".into(), ClaimValue::from("NaN"))));
        assert_eq!(parse_claim("eq=a=b"), Ok(("eq".into(), ClaimValue::from("a=b"))));
        assert_eq!(parse_claim("empty="), Ok(("empty".into(), ClaimValue::from(""))));
    }

    #[test]
    fn test_parse_claim_rejects() {
        assert!(parse_claim("novalue").is_err());
        assert!(parse_claim("=v").is_err());
    }

    #[test]
    fn test_issue_then_verify() {
        let key = test_key();
        let token = issue_token(
            vec![("sub".into(), ClaimValue::from("u1"))],
            &key,
            3600,
        )
        .expect("issue");

        let printed = verify_token(&token, &key).expect("verify");
        let json: serde_json::Value = serde_json::from_str(&printed).expect("json output");
        assert_eq!(json["sub"], "u1");
        assert!(json["exp"].is_i64());
    }

    #[test]
    fn test_verify_failure_maps_to_auth_error() {
        let key = test_key();
        let token = issue_token(Vec::new(), &key, -10).expect("issue");

        let err = verify_token(&token, &key).expect_err("expired");
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.user_message(), "Invalid or expired token");

        let err = verify_token("garbage", &key).expect_err("malformed");
        assert!(matches!(err, AppError::Auth(lib_auth::Error::TokenMalformed(_))));
    }

    #[test]
    fn test_pwd_commands() {
        let stored = hash_pwd("cli-pwd").expect("hash");

        assert_eq!(verify_pwd("cli-pwd", &stored).expect("match"), "ok");
        let err = verify_pwd("other", &stored).expect_err("mismatch");
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_inspect_does_not_need_key() {
        let token = issue_token(vec![("sub".into(), ClaimValue::from("u9"))], &test_key(), 60)
            .expect("issue");

        let printed = inspect_token(&token).expect("inspect");
        assert!(printed.contains("\"u9\""));
    }
}
