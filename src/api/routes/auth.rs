//! Auth Routes
//!
//! - POST /api/auth/signup - Create an account (signs in)
//! - POST /api/auth/login - Start a session
//! - POST /api/auth/logout - End the current session
//! - GET /api/auth/me - Current user

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::MeResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthUser;
use crate::api::state::AppState;
use crate::auth::{AuthSession, LoginForm, SignupForm};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignupForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthSession>)> {
    let Json(form) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let session = state.auth.signup(form).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginForm>, JsonRejection>,
) -> ApiResult<Json<AuthSession>> {
    let Json(form) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let session = state.auth.login(form).await?;
    Ok(Json(session))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<StatusCode> {
    state.auth.logout(&auth.token)?;
    tracing::info!(user_id = %auth.user.id, "signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user: auth.user })
}
