//! # Mindu
//!
//! Mental-wellness self-assessment service: a five-category questionnaire,
//! per-user score history with trends, and an LLM-backed advisor for chat
//! and structured feedback.
//!
//! ## Modules
//!
//! - [`assessment`]: Question bank, scoring and quiz pagination
//! - [`auth`]: Accounts, argon2 password hashes and bearer sessions
//! - [`storage`]: Embedded SQLite store (users, sessions, `user_responses`)
//! - [`llm`]: Chat completions client, prompts and the tolerant feedback parser
//! - [`dashboard`]: Trend and breakdown reduction over a user's history
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use mindu::assessment::{Category, CategoryScores, ScoreBand};
//! use mindu::dashboard::summarize;
//! use mindu::storage::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! let user = store.create_user("ada@example.com", "ada", "<hash>").unwrap();
//!
//! let scores = CategoryScores::new([3.4, 4.0, 2.2, 5.0, 1.0]).unwrap();
//! store.save_response(&user.id, scores).unwrap();
//!
//! let history = store.user_responses(&user.id).unwrap();
//! let summary = summarize(&history).unwrap();
//! assert_eq!(summary.overall_average, 3.1);
//! assert_eq!(summary.latest[0].category, Category::StressAndAnxiety);
//! assert_eq!(summary.band, ScoreBand::Fair);
//! ```

pub mod api;
pub mod assessment;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod llm;
pub mod logging;
pub mod storage;

// Re-export top-level types for convenience
pub use assessment::{
    AnswerSheet, AssessmentError, Category, CategoryScores, QuizSession, ScoreBand,
};

pub use auth::{AuthError, AuthService, AuthSession, LoginForm, SignupForm};

pub use storage::{ResponseRecord, StorageError, StorageResult, Store, User};

pub use llm::{
    parse_feedback, ChatMessage, CompletionProvider, FeedbackReport, FeedbackTag, LlmClient,
    LlmError,
};

pub use dashboard::{summarize, Dashboard, DashboardSummary};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
