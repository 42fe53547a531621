//! HTTP API Client
//!
//! Functions for communicating with the Mindu REST API.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api";

/// Shown whenever the advisor cannot be reached
pub const LLM_ERROR_MESSAGE: &str = "Failed to get response from LLM";

const API_URL_KEY: &str = "mindu_api_url";
const TOKEN_KEY: &str = "mindu_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Bearer token of the signed-in user, if any
pub fn get_token() -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.is_empty())
}

pub fn set_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

// ============ Response Types ============

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    pub expires_at: i64,
}

#[derive(Debug, serde::Deserialize)]
struct MeResponse {
    user: User,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuestionBank {
    pub scale: LikertScale,
    pub sets: Vec<QuestionSet>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LikertScale {
    pub min: u8,
    pub max: u8,
    pub min_label: String,
    pub max_label: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuestionSet {
    pub index: u8,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Question {
    pub id: u8,
    pub text: String,
}

/// Category index → question id → answer
pub type AnswerSheet = BTreeMap<u8, BTreeMap<u8, u8>>;

/// A stored assessment
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: String,
    pub user_id: String,
    /// Category index → score
    pub answers: BTreeMap<u8, f64>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Deserialize)]
struct ResponseListResponse {
    responses: Vec<ResponseRecord>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct FeedbackReport {
    pub tag: String,
    pub feedback: String,
    pub action: String,
    pub source: String,
}

impl FeedbackReport {
    /// Action text split into sentences
    pub fn action_items(&self) -> Vec<String> {
        self.action
            .split(". ")
            .map(|s| s.trim().trim_end_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FeedbackResponse {
    pub response: String,
    pub report: FeedbackReport,
}

#[derive(Debug, serde::Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub title: String,
    pub score: f64,
    pub band_label: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub response_id: String,
    pub timestamp: i64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub overall_average: f64,
    pub band_label: String,
    pub assessments_taken: usize,
    pub latest_timestamp: i64,
    pub latest: Vec<CategoryBreakdown>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, serde::Deserialize)]
struct DashboardResponse {
    summary: Option<DashboardSummary>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ============ Request plumbing ============

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send(request: Request) -> Result<Response, String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status() == 401 {
        // Stale or revoked session
        clear_token();
    }

    if !response.ok() {
        let error: Option<ApiError> = response.json().await.ok();
        return Err(error
            .map(|e| e.error.message)
            .unwrap_or_else(|| format!("Request failed ({})", response.status())));
    }

    Ok(response)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let request = authorized(Request::get(&format!("{}{}", get_api_base(), path)))
        .build()
        .map_err(|e| format!("Request build error: {}", e))?;

    send(request)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, String> {
    let request = authorized(Request::post(&format!("{}{}", get_api_base(), path)))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?;

    send(request)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ API Functions ============

/// Create an account and store the session token
pub async fn signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<AuthSession, String> {
    let session: AuthSession = post_json(
        "/auth/signup",
        &serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
            "confirmPassword": confirm_password,
        }),
    )
    .await?;

    set_token(&session.token);
    Ok(session)
}

/// Log in and store the session token
pub async fn login(email: &str, password: &str) -> Result<AuthSession, String> {
    let session: AuthSession = post_json(
        "/auth/login",
        &serde_json::json!({"email": email, "password": password}),
    )
    .await?;

    set_token(&session.token);
    Ok(session)
}

/// End the session server-side and forget the token locally
pub async fn logout() {
    if let Ok(request) = authorized(Request::post(&format!("{}/auth/logout", get_api_base()))).build() {
        if let Err(e) = send(request).await {
            web_sys::console::warn_1(&format!("Logout failed: {}", e).into());
        }
    }
    clear_token();
}

/// Current user for the stored token
pub async fn fetch_me() -> Result<User, String> {
    let me: MeResponse = get_json("/auth/me").await?;
    Ok(me.user)
}

pub async fn fetch_questions() -> Result<QuestionBank, String> {
    get_json("/questions").await
}

/// Store a finished quiz; the server reduces answers to category scores
pub async fn submit_answers(answers: &AnswerSheet) -> Result<ResponseRecord, String> {
    post_json("/responses", &serde_json::json!({ "answers": answers })).await
}

/// The user's assessments, oldest first
pub async fn fetch_responses() -> Result<Vec<ResponseRecord>, String> {
    let list: ResponseListResponse = get_json("/responses").await?;
    Ok(list.responses)
}

/// Dashboard summary, `None` until the first assessment
pub async fn fetch_dashboard() -> Result<Option<DashboardSummary>, String> {
    let dashboard: DashboardResponse = get_json("/dashboard").await?;
    Ok(dashboard.summary)
}

pub async fn send_chat(query: &str) -> Result<String, String> {
    let reply: ChatResponse = post_json("/chat", &serde_json::json!({ "query": query })).await?;
    Ok(reply.response)
}

/// AI feedback for scores keyed by category title
pub async fn request_feedback(
    scores: &BTreeMap<String, f64>,
) -> Result<FeedbackResponse, String> {
    post_json("/feedback", scores).await
}
