//! Chat Route
//!
//! - POST /api/chat - Ask the advisor a free-form question

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChatRequest, ChatResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::llm::chat_messages;

/// POST /api/chat
///
/// Forwards `query` to the chat model under the advisor persona. A missing
/// or blank query is rejected; a model reply with no choices yields `""`.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let query = body
        .ok()
        .and_then(|Json(req)| req.query)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Query is required".to_string()))?;

    let content = state
        .llm
        .complete(&state.config.chat_model, &chat_messages(&query))
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(ChatResponse {
        response: content.unwrap_or_default(),
    }))
}
