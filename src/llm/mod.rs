//! LLM Integration
//!
//! - **client**: OpenAI-compatible chat completions client and the
//!   `CompletionProvider` seam
//! - **prompts**: Static prompt templates and model names
//! - **feedback**: Tolerant parser for the feedback model's JSON output

pub mod client;
pub mod feedback;
pub mod prompts;

pub use client::{ChatMessage, CompletionProvider, LlmClient, LlmConfig, LlmError, DEFAULT_BASE_URL};
pub use feedback::{parse_feedback, FeedbackReport, FeedbackTag, ReportSource};
pub use prompts::{chat_messages, feedback_messages, CHAT_MODEL, FEEDBACK_MODEL};
