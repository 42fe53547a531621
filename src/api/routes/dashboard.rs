//! Dashboard Route
//!
//! - GET /api/dashboard - Trend and latest breakdown for the signed-in user

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::extract::AuthUser;
use crate::api::state::AppState;
use crate::dashboard::Dashboard;

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<Dashboard>> {
    let records = state.store.user_responses(&auth.user.id)?;
    Ok(Json(Dashboard::from_records(&records)))
}
