//! Form validation
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! always sees exactly one message.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::auth::error::{AuthError, AuthResult};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;

/// Signup form, as posted by the UI
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

impl SignupForm {
    pub fn validate(&self) -> AuthResult<()> {
        if self.password != self.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        if self.username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(AuthError::Validation(format!(
                "Username must be at least {} characters long",
                MIN_USERNAME_LEN
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".into(),
            ));
        }
        Ok(())
    }
}

impl LoginForm {
    pub fn validate(&self) -> AuthResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn message(result: AuthResult<()>) -> String {
        match result {
            Err(AuthError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(form("ada", "ada@example.com", "password1", "password1")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_mismatch_checked_first() {
        // Also too short and bad username, but mismatch wins
        let f = form("a", "nope", "short", "other");
        assert_eq!(message(f.validate()), "Passwords do not match");
    }

    #[test]
    fn test_password_length() {
        let f = form("a", "nope", "short", "short");
        assert_eq!(
            message(f.validate()),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_username_length() {
        let f = form(" ab ", "ada@example.com", "password1", "password1");
        assert_eq!(
            message(f.validate()),
            "Username must be at least 3 characters long"
        );
    }

    #[test]
    fn test_email_shape() {
        let f = form("ada", "ada.example.com", "password1", "password1");
        assert_eq!(message(f.validate()), "Please enter a valid email address");
        assert!(is_valid_email(" ada@example.co.uk "));
        assert!(!is_valid_email("ada@localhost"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let f = LoginForm {
            email: " ".into(),
            password: "x".into(),
        };
        assert!(f.validate().is_err());
    }
}
