//! Authentication
//!
//! Email/password accounts with argon2 hashes and opaque bearer sessions.
//!
//! - **validation**: Signup/login form checks
//! - **password**: Argon2 hashing
//! - **service**: `AuthService` (signup, login, logout, authenticate)
//! - **error**: Error types

pub mod error;
pub mod password;
pub mod service;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use password::{hash_password, verify_password};
pub use service::{AuthService, AuthSession, DEFAULT_SESSION_TTL_HOURS};
pub use validation::{is_valid_email, LoginForm, SignupForm, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
