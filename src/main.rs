//! Mindu API Server
//!
//! Run with: cargo run --bin mindu
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see [`mindu::config`]),
//! then applies environment overrides:
//! - `MINDU_DATA_DIR`: Data directory
//! - `MINDU_API_HOST` / `MINDU_API_PORT`: Bind address (default: 0.0.0.0:8082)
//! - `GROQ_API_KEY` or `MINDU_LLM_API_KEY`: Enables chat and feedback
//! - `MINDU_LLM_BASE_URL`: OpenAI-compatible endpoint root
//! - `MINDU_SESSION_TTL_HOURS`: Session lifetime (default: 168)
//! - `MINDU_LOG_LEVEL` / `MINDU_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use anyhow::Context;
use mindu::api::{serve, AppState};
use mindu::auth::AuthService;
use mindu::config::Config;
use mindu::llm::LlmClient;
use mindu::logging::init_tracing;
use mindu::storage::Store;
use std::sync::Arc;
use std::time::Duration;

/// How often expired sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Mindu API server v{}", env!("CARGO_PKG_VERSION"));

    let storage_config = config.storage_config();
    tracing::info!("Data directory: {:?}", storage_config.data_dir);

    // Open the database
    let store = Arc::new(
        Store::open(&storage_config)
            .with_context(|| format!("opening store in {:?}", storage_config.data_dir))?,
    );

    // LLM client
    let llm = Arc::new(
        LlmClient::new(config.llm_client_config()).context("building LLM HTTP client")?,
    );
    if config.llm_configured() {
        tracing::info!("LLM endpoint: {}", config.llm.base_url);
    } else {
        tracing::warn!("No LLM API key set (GROQ_API_KEY); chat and feedback will fail");
    }

    let api_config = config.api_config();

    // Sweep expired sessions in the background
    let sweeper = spawn_session_purge(AuthService::new(
        Arc::clone(&store),
        api_config.session_ttl_hours,
    ));

    let state = AppState::new(Arc::clone(&store), llm, api_config.clone());

    // Run server
    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    sweeper.abort();
    tracing::info!("Mindu API server stopped");

    Ok(())
}

fn spawn_session_purge(auth: AuthService) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match auth.purge_expired() {
                Ok(0) => {}
                Ok(n) => tracing::info!("Purged {} expired sessions", n),
                Err(e) => tracing::warn!("Session purge failed: {}", e),
            }
        }
    })
}
