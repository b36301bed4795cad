//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate maximum length, in bytes.
pub fn validate_max_length(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.len() > max {
        Err(format!("{} must be at most {} bytes", field_name, max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x", "Password").is_ok());
        assert_eq!(
            validate_not_empty("", "Password"),
            Err("Password cannot be empty".to_string())
        );
        // Whitespace is a legitimate password character.
        assert!(validate_not_empty("   ", "Password").is_ok());
    }

    #[test]
    fn test_validate_max_length() {
        assert!(validate_max_length("abcd", 4, "Password").is_ok());
        assert_eq!(
            validate_max_length("abcde", 4, "Password"),
            Err("Password must be at most 4 bytes".to_string())
        );
    }
}
