//! Form Validation
//!
//! Same rules the API applies, checked before any request is sent.

use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

/// First problem with a signup form, if any
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }
    if username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        ));
    }
    if !email_pattern().is_match(email.trim()) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup("ada", "ada@example.com", "password1", "password1").is_ok());
    }

    #[test]
    fn test_signup_rule_order() {
        // Mismatch is reported before length
        assert_eq!(
            validate_signup("a", "bad", "short", "other"),
            Err("Passwords do not match".to_string())
        );
        assert_eq!(
            validate_signup("a", "bad", "short", "short"),
            Err("Password must be at least 8 characters long".to_string())
        );
        assert_eq!(
            validate_signup("  a ", "bad", "password1", "password1"),
            Err("Username must be at least 3 characters long".to_string())
        );
        assert_eq!(
            validate_signup("ada", "bad", "password1", "password1"),
            Err("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("ada@example.com", "").is_err());
        assert!(validate_login("ada@example.com", "x").is_ok());
    }
}
