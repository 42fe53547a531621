//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::auth::{AuthService, DEFAULT_SESSION_TTL_HOURS};
use crate::llm::{CompletionProvider, CHAT_MODEL, FEEDBACK_MODEL};
use crate::storage::Store;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Accounts, sessions and stored assessments
    pub store: Arc<Store>,
    /// Signup/login/session checks over `store`
    pub auth: AuthService,
    /// Chat completions backend
    pub llm: Arc<dyn CompletionProvider>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, llm: Arc<dyn CompletionProvider>, config: ApiConfig) -> Self {
        let auth = AuthService::new(Arc::clone(&store), config.session_ttl_hours);
        Self {
            store,
            auth,
            llm,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Session lifetime handed to the auth service
    pub session_ttl_hours: i64,
    /// Model for `/api/chat`
    pub chat_model: String,
    /// Model for `/api/feedback`
    pub feedback_model: String,
    /// Whether an LLM API key is configured (reported by `/health`)
    pub llm_configured: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            cors_origins: Vec::new(),
            request_timeout_ms: 60_000,
            max_body_size: 1024 * 1024, // 1MB
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            chat_model: CHAT_MODEL.to_string(),
            feedback_model: FEEDBACK_MODEL.to_string(),
            llm_configured: false,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let config = ApiConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8082");
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
        assert_eq!(config.session_ttl_hours, 168);
        assert!(config.cors_origins.is_empty());
    }
}
