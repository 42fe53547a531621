//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assessment::{AnswerSheet, Category};
use crate::llm::FeedbackReport;
use crate::storage::{ResponseRecord, StoreStats, User};

// ============================================
// LLM DTOs
// ============================================

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Chat (and raw feedback) response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model output, empty when the model returned no choice
    pub response: String,
}

/// Feedback response: the raw model text plus the parsed report
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub response: String,
    pub report: FeedbackReport,
}

// ============================================
// AUTH DTOs
// ============================================

/// Current user
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
}

// ============================================
// RESPONSE DTOs
// ============================================

/// Submit a completed assessment, either raw or already reduced
#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    /// Category index → question id → answer (1-5)
    #[serde(default)]
    pub answers: Option<AnswerSheet>,
    /// Category index → score (1.0-5.0)
    #[serde(default)]
    pub scores: Option<BTreeMap<u8, f64>>,
}

/// A user's stored assessments, oldest first
#[derive(Debug, Serialize)]
pub struct ResponseListResponse {
    pub total: usize,
    pub responses: Vec<ResponseRecord>,
}

// ============================================
// QUESTION DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct QuestionBankResponse {
    pub scale: LikertScale,
    pub sets: Vec<QuestionSetDto>,
}

#[derive(Debug, Serialize)]
pub struct LikertScale {
    pub min: u8,
    pub max: u8,
    pub min_label: &'static str,
    pub max_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuestionSetDto {
    /// 1-based category index, the key used in answer sheets
    pub index: u8,
    pub category: Category,
    pub title: &'static str,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct QuestionDto {
    pub id: u8,
    pub text: &'static str,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// LLM status: configured, not_configured
    pub llm: String,
    /// Row counts, when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
