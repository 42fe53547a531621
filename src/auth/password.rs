//! Argon2 password hashing
//!
//! Both calls are CPU-bound and block until done; async callers should go
//! through `tokio::task::spawn_blocking`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::auth::error::{AuthError, AuthResult};

/// Argon2 needs more stack than a default thread has in debug builds
const HASH_STACK_SIZE: usize = 4 * 1024 * 1024;

/// Hash a password into a PHC string (salt included)
pub fn hash_password(password: &str) -> AuthResult<String> {
    let password = password.to_string();
    std::thread::Builder::new()
        .stack_size(HASH_STACK_SIZE)
        .spawn(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::Hashing(e.to_string()))
        })
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .join()
        .map_err(|_| AuthError::Hashing("hash thread panicked".to_string()))?
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// PHC string of a throwaway password. Logins for unknown emails verify
/// against it so they cost the same argon2 work as real ones.
pub fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("mindu-no-such-account").unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn dummy_hash_initialized() -> bool {
    DUMMY_HASH.get().is_some()
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    std::thread::Builder::new()
        .stack_size(HASH_STACK_SIZE)
        .spawn(move || {
            let parsed = match PasswordHash::new(&hash) {
                Ok(h) => h,
                Err(_) => return false,
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .map(|h| h.join().unwrap_or(false))
        .unwrap_or(false)
}
