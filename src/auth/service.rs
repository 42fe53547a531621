//! Account and session management
//!
//! ```text
//! signup ──► validate ──► hash (blocking pool) ──► users row ──► session
//! login  ──► lookup ──► verify (blocking pool) ──► session
//! request ──► bearer token ──► authenticate ──► User
//! ```

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::error::{AuthError, AuthResult};
use crate::auth::password::{dummy_hash, hash_password, verify_password};
use crate::auth::validation::{LoginForm, SignupForm};
use crate::storage::{StorageError, Store, User};

/// Default session lifetime: one week
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;

/// Longest accepted session lifetime: one year
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// A signed-in user and the bearer token that identifies them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    /// Milliseconds since epoch
    pub expires_at: i64,
}

/// Signup, login, logout and token checks over the store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<Store>,
    session_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(store: Arc<Store>, session_ttl_hours: i64) -> Self {
        Self {
            store,
            session_ttl: chrono::Duration::hours(
                session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS),
            ),
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        self.session_ttl
    }

    /// Create an account and sign it in
    pub async fn signup(&self, form: SignupForm) -> AuthResult<AuthSession> {
        form.validate()?;

        let password = form.password.clone();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let user = self
            .store
            .create_user(&form.email, &form.username, &hash)
            .map_err(|e| match e {
                StorageError::Duplicate(_) => AuthError::EmailTaken,
                other => AuthError::Storage(other),
            })?;

        self.open_session(user)
    }

    /// Check credentials and issue a new session
    pub async fn login(&self, form: LoginForm) -> AuthResult<AuthSession> {
        form.validate()?;

        let credentials = self.store.find_credentials(&form.email)?;

        // Unknown emails still pay for one verify
        let password = form.password;
        let stored = credentials.as_ref().map(|c| c.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || {
            let hash = stored.as_deref().unwrap_or_else(|| dummy_hash());
            verify_password(&password, hash)
        })
        .await
        .map_err(|e| {
            tracing::error!("password verification task failed: {}", e);
            AuthError::Hashing(e.to_string())
        })?;

        match credentials {
            Some(credentials) if matches => self.open_session(credentials.user),
            Some(credentials) => {
                tracing::debug!("login rejected for {}", credentials.user.id);
                Err(AuthError::InvalidCredentials)
            }
            None => Err(AuthError::InvalidCredentials),
        }
    }

    /// End a session. Unknown tokens are not an error.
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        if self.store.delete_session(token)? {
            tracing::debug!("session closed");
        }
        Ok(())
    }

    /// Resolve a bearer token to its user
    pub fn authenticate(&self, token: &str) -> AuthResult<User> {
        if token.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        self.store
            .find_session_user(token, Utc::now().timestamp_millis())?
            .ok_or(AuthError::Unauthorized)
    }

    /// Remove expired sessions
    pub fn purge_expired(&self) -> AuthResult<usize> {
        Ok(self
            .store
            .purge_expired_sessions(Utc::now().timestamp_millis())?)
    }

    fn open_session(&self, user: User) -> AuthResult<AuthSession> {
        let session = self.store.create_session(
            &user.id,
            self.session_ttl,
            Utc::now().timestamp_millis(),
        )?;

        tracing::info!(user_id = %user.id, "session opened");
        Ok(AuthSession {
            token: session.token,
            expires_at: session.expires_at,
            user,
        })
    }
}
