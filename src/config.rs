//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api;
use crate::llm;
use crate::storage;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database location
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("mindu").to_string_lossy().to_string())
        .unwrap_or_else(|| "./mindu_data".to_string())
}

fn default_database_file() -> String {
    "mindu.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_request_timeout() -> u64 {
    60
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_size(),
        }
    }
}

/// Chat completions endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Usually supplied through `GROQ_API_KEY` rather than the file
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_feedback_model")]
    pub feedback_model: String,

    #[serde(default = "default_llm_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_llm_retries")]
    pub max_retries: u32,
}

fn default_llm_base_url() -> String {
    llm::DEFAULT_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    llm::CHAT_MODEL.to_string()
}

fn default_feedback_model() -> String {
    llm::FEEDBACK_MODEL.to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

fn default_llm_retries() -> u32 {
    3
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: None,
            chat_model: default_chat_model(),
            feedback_model: default_feedback_model(),
            request_timeout_secs: default_llm_timeout(),
            max_retries: default_llm_retries(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl() -> i64 {
    crate::auth::DEFAULT_SESSION_TTL_HOURS
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("mindu").join("config.toml")),
            Some(PathBuf::from("/etc/mindu/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in practice)
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = var("MINDU_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // API overrides
        if let Some(host) = var("MINDU_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("MINDU_API_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }

        // LLM overrides; the Mindu-specific key wins over the provider's
        if let Some(url) = var("MINDU_LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(key) = var("MINDU_LLM_API_KEY").or_else(|| var("GROQ_API_KEY")) {
            self.llm.api_key = Some(key);
        }

        // Auth overrides
        if let Some(ttl) = var("MINDU_SESSION_TTL_HOURS").and_then(|t| t.parse().ok()) {
            self.auth.session_ttl_hours = ttl;
        }

        // Logging overrides
        if let Some(level) = var("MINDU_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MINDU_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Whether a non-empty LLM API key is set
    pub fn llm_configured(&self) -> bool {
        self.llm.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Runtime storage settings
    pub fn storage_config(&self) -> storage::StorageConfig {
        storage::StorageConfig {
            data_dir: PathBuf::from(&self.storage.data_dir),
            database_file: self.storage.database_file.clone(),
        }
    }

    /// Runtime LLM client settings
    pub fn llm_client_config(&self) -> llm::LlmConfig {
        llm::LlmConfig {
            base_url: self.llm.base_url.clone(),
            api_key: self.llm.api_key.clone(),
            request_timeout_ms: self.llm.request_timeout_secs * 1000,
            max_retries: self.llm.max_retries,
            ..Default::default()
        }
    }

    /// Runtime API server settings
    pub fn api_config(&self) -> api::ApiConfig {
        api::ApiConfig {
            host: self.api.host.clone(),
            port: self.api.port,
            cors_origins: self.api.cors_origins.clone(),
            request_timeout_ms: self.api.request_timeout_secs * 1000,
            max_body_size: self.api.max_body_bytes,
            session_ttl_hours: self.auth.session_ttl_hours,
            chat_model: self.llm.chat_model.clone(),
            feedback_model: self.llm.feedback_model.clone(),
            llm_configured: self.llm_configured(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Mindu Configuration
#
# Environment variables override these settings:
# - MINDU_DATA_DIR
# - MINDU_API_HOST
# - MINDU_API_PORT
# - MINDU_LLM_BASE_URL
# - MINDU_LLM_API_KEY (or GROQ_API_KEY)
# - MINDU_SESSION_TTL_HOURS
# - MINDU_LOG_LEVEL
# - MINDU_LOG_FORMAT

[storage]
# Directory holding the SQLite database
data_dir = "~/.local/share/mindu"

# Database file name inside data_dir
database_file = "mindu.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty list allows any origin)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Request timeout in seconds
request_timeout_secs = 60

# Maximum request body size in bytes
max_body_bytes = 1048576

[llm]
# OpenAI-compatible endpoint root
base_url = "https://api.groq.com/openai/v1"

# API key (prefer the GROQ_API_KEY environment variable)
# api_key = ""

# Model answering chat questions
chat_model = "llama-3.1-8b-instant"

# Model producing assessment feedback
feedback_model = "meta-llama/llama-4-scout-17b-16e-instruct"

# Per-request timeout in seconds
request_timeout_secs = 30

# Attempts per request (timeouts, connection errors and HTTP 429 are retried)
max_retries = 3

[auth]
# Session lifetime in hours
session_ttl_hours = 168

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
