//! Feedback Route
//!
//! - POST /api/feedback - AI feedback for a set of category scores

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::FeedbackResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::assessment::{LIKERT_MAX, LIKERT_MIN};
use crate::llm::{feedback_messages, parse_feedback};

const SCORES_REQUIRED: &str = "Category-wise scores are required and must be an object";

/// Stand-in model output when the reply carries no choice
pub const NO_RESPONSE: &str = "No response received from LLM";

/// POST /api/feedback
///
/// Body is a category-name → score object, e.g.
/// `{"Stress and Anxiety": 3.4, "Self-Esteem": 2.0}`. Returns the raw model
/// text and the parsed report (fallback report when unparseable).
pub async fn feedback(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<FeedbackResponse>> {
    let scores = match body {
        Ok(Json(value)) => validate_scores(value)?,
        Err(_) => return Err(ApiError::Validation(SCORES_REQUIRED.to_string())),
    };

    let content = state
        .llm
        .complete(&state.config.feedback_model, &feedback_messages(&scores))
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let response = content.unwrap_or_else(|| NO_RESPONSE.to_string());
    let report = parse_feedback(&response);
    tracing::info!(tag = %report.tag, source = ?report.source, "feedback generated");

    Ok(Json(FeedbackResponse { response, report }))
}

/// Accept a non-empty object whose values are all numbers in the Likert range
fn validate_scores(value: Value) -> ApiResult<BTreeMap<String, f64>> {
    let object = match value {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ApiError::Validation(SCORES_REQUIRED.to_string())),
    };

    let (min, max) = (LIKERT_MIN as f64, LIKERT_MAX as f64);
    object
        .into_iter()
        .map(|(name, score)| match score.as_f64() {
            Some(s) if (min..=max).contains(&s) => Ok((name, s)),
            _ => Err(ApiError::Validation(format!(
                "Score for '{}' must be a number between {} and {}",
                name, LIKERT_MIN, LIKERT_MAX
            ))),
        })
        .collect()
}
