//! Auth error types

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by signup, login and session checks
#[derive(Error, Debug)]
pub enum AuthError {
    /// Form rejected before touching the store
    #[error("{0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    /// Wrong email or password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, unknown or expired session token
    #[error("Authentication required")]
    Unauthorized,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AuthResult<T> = Result<T, AuthError>;
