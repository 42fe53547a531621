//! Response Routes
//!
//! The `userResponses` collection, scoped to the signed-in user.
//!
//! - POST /api/responses - Store a completed assessment
//! - GET /api/responses - List own assessments (oldest first)
//! - GET /api/responses/:id - Get one own assessment

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ResponseListResponse, SubmitResponseRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthUser;
use crate::api::state::AppState;
use crate::assessment::CategoryScores;
use crate::storage::ResponseRecord;

/// POST /api/responses
///
/// Accepts either the raw answer sheet (`answers`) or category scores that
/// were already reduced client-side (`scores`), never both.
pub async fn submit_response(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    body: Result<Json<SubmitResponseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ResponseRecord>)> {
    let Json(req) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let scores = match (req.answers, req.scores) {
        (Some(sheet), None) => CategoryScores::from_answers(&sheet)?,
        (None, Some(scores)) => CategoryScores::try_from(scores)?,
        _ => {
            return Err(ApiError::Validation(
                "Provide either 'answers' or 'scores'".to_string(),
            ))
        }
    };

    let record = state.store.save_response(&auth.user.id, scores)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/responses
pub async fn list_responses(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<ResponseListResponse>> {
    let responses = state.store.user_responses(&auth.user.id)?;
    Ok(Json(ResponseListResponse {
        total: responses.len(),
        responses,
    }))
}

/// GET /api/responses/:id
///
/// Another user's record is reported as not found.
pub async fn get_response(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ResponseRecord>> {
    state
        .store
        .get_response(&auth.user.id, &id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Response {} not found", id)))
}
