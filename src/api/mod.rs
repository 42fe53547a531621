//! Mindu REST API
//!
//! HTTP API layer for Mindu, built with Axum.
//!
//! # Endpoints
//!
//! ## Assistant
//! - `POST /api/chat` - Ask the advisor a question
//! - `POST /api/feedback` - AI feedback for category scores
//!
//! ## Assessment
//! - `GET /api/questions` - Question bank
//! - `POST /api/responses` - Store a completed assessment (auth)
//! - `GET /api/responses` - List own assessments (auth)
//! - `GET /api/responses/:id` - Get one own assessment (auth)
//! - `GET /api/dashboard` - Trend summary (auth)
//!
//! ## Auth
//! - `POST /api/auth/signup` - Create an account
//! - `POST /api/auth/login` - Start a session
//! - `POST /api/auth/logout` - End the session (auth)
//! - `GET /api/auth/me` - Current user (auth)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! (auth) routes expect `Authorization: Bearer <token>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mindu::api::{serve, ApiConfig, AppState};
//! use mindu::llm::{LlmClient, LlmConfig};
//! use mindu::storage::{StorageConfig, Store};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open(&StorageConfig::default())?);
//!     let llm = Arc::new(LlmClient::new(LlmConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, llm, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::AuthUser;
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Assistant routes
        .route("/chat", post(routes::chat::chat))
        .route("/feedback", post(routes::feedback::feedback))
        // Assessment routes
        .route("/questions", get(routes::questions::list_questions))
        .route(
            "/responses",
            get(routes::responses::list_responses).post(routes::responses::submit_response),
        )
        .route("/responses/:id", get(routes::responses::get_response))
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        // Auth routes
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me))
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Mindu API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Mindu API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, CompletionProvider, LlmError};
    use crate::storage::Store;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    /// Canned completions; records the last model and conversation it saw
    #[derive(Default)]
    struct StubProvider {
        reply: Option<String>,
        fail: bool,
        seen: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    impl StubProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            model: &str,
            messages: &[ChatMessage],
        ) -> Result<Option<String>, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((model.to_string(), messages.to_vec()));
            if self.fail {
                return Err(LlmError::Unavailable);
            }
            Ok(self.reply.clone())
        }
    }

    fn create_test_app(provider: StubProvider) -> (Router, Arc<StubProvider>) {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let provider = Arc::new(provider);
        let state = AppState::new(store, provider.clone(), ApiConfig::default());
        (build_router(state), provider)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn signup(app: &Router, email: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({
                    "username": "ada",
                    "email": email,
                    "password": "password1",
                    "confirmPassword": "password1"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn full_answers(value: u8) -> Value {
        let set: Value = (1..=5).map(|q| (q.to_string(), json!(value))).collect();
        (1..=5).map(|c| (c.to_string(), set.clone())).collect()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _) = create_test_app(StubProvider::default());

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }

        let response = app.oneshot(get_request("/health", None)).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["storage"], "ok");
        assert_eq!(body["llm"], "not_configured");
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_chat() {
        let (app, provider) = create_test_app(StubProvider::replying("Try a bedtime routine."));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/chat",
                None,
                json!({"query": "My child can't sleep"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"response": "Try a bedtime routine."})
        );

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].0, "llama-3.1-8b-instant");
        assert_eq!(seen[0].1[0].content, "You are a child mental health advisor");
        assert_eq!(seen[0].1[1].content, "My child can't sleep");
    }

    #[tokio::test]
    async fn test_chat_requires_query() {
        let (app, provider) = create_test_app(StubProvider::replying("unused"));

        for body in [json!({}), json!({"query": ""}), json!({"query": "   "})] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/chat", None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"]["message"], "Query is required");
            assert!(body["request_id"].is_string());
        }
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_llm_failure() {
        let (app, _) = create_test_app(StubProvider::failing());

        let response = app
            .oneshot(json_request("POST", "/api/chat", None, json!({"query": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Failed to get response from LLM");
    }

    #[tokio::test]
    async fn test_chat_without_choice_is_empty() {
        let (app, _) = create_test_app(StubProvider::default());

        let response = app
            .oneshot(json_request("POST", "/api/chat", None, json!({"query": "hi"})))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"response": ""}));
    }

    #[tokio::test]
    async fn test_feedback() {
        let reply = "```json\n{\"action\": \"Sleep well. Talk to a friend.\", \"feedback\": \"Doing okay.\", \"tag\": \"Needs Help\"}\n```";
        let (app, provider) = create_test_app(StubProvider::replying(reply));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/feedback",
                None,
                json!({"Stress and Anxiety": 2.2, "Self-Esteem": 3.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], reply);
        assert_eq!(body["report"]["tag"], "needs help");
        assert_eq!(body["report"]["feedback"], "Doing okay.");
        assert_eq!(body["report"]["source"], "model");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].0, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert!(seen[0].1[1].content.contains(r#""Stress and Anxiety":2.2"#));
    }

    #[tokio::test]
    async fn test_feedback_rejects_bad_bodies() {
        let (app, _) = create_test_app(StubProvider::replying("unused"));

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/feedback", None, json!([3, 4])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Category-wise scores are required and must be an object"
        );

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/feedback",
                None,
                json!({"Self-Esteem": 7}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_feedback_without_choice_falls_back() {
        let (app, _) = create_test_app(StubProvider::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/feedback",
                None,
                json!({"Self-Esteem": 3}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["response"], "No response received from LLM");
        assert_eq!(body["report"]["source"], "fallback");
        assert_eq!(body["report"]["tag"], "needs help");
    }

    #[tokio::test]
    async fn test_questions() {
        let (app, _) = create_test_app(StubProvider::default());

        let response = app.oneshot(get_request("/api/questions", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["sets"].as_array().unwrap().len(), 5);
        assert_eq!(body["sets"][0]["title"], "Stress and Anxiety");
        assert_eq!(body["sets"][4]["questions"].as_array().unwrap().len(), 5);
        assert_eq!(body["scale"]["max"], 5);
    }

    #[tokio::test]
    async fn test_signup_login_logout() {
        let (app, _) = create_test_app(StubProvider::default());
        let token = signup(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(get_request("/api/auth/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["user"]["email"], "ada@example.com");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({"email": "ada@example.com", "password": "password1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let second = body_json(response).await["token"].as_str().unwrap().to_string();
        assert_ne!(second, token);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/logout", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(get_request("/api/auth/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Other session unaffected
        let response = app
            .oneshot(get_request("/api/auth/me", Some(&second)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_errors() {
        let (app, _) = create_test_app(StubProvider::default());
        signup(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({
                    "username": "ada",
                    "email": "ada@example.com",
                    "password": "password1",
                    "confirmPassword": "password1"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({
                    "username": "bob",
                    "email": "bob@example.com",
                    "password": "short",
                    "confirmPassword": "short"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Password must be at least 8 characters long"
        );
    }

    #[tokio::test]
    async fn test_login_failure_is_generic() {
        let (app, _) = create_test_app(StubProvider::default());
        signup(&app, "ada@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({"email": "ada@example.com", "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid email or password"
        );
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let (app, _) = create_test_app(StubProvider::default());

        for uri in ["/api/responses", "/api/dashboard", "/api/auth/me"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let response = app
                .clone()
                .oneshot(get_request(uri, Some("not-a-real-token")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_submit_and_list_responses() {
        let (app, _) = create_test_app(StubProvider::default());
        let token = signup(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/responses",
                Some(&token),
                json!({"answers": full_answers(4)}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let record = body_json(response).await;
        assert_eq!(record["answers"]["1"], 4.0);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/responses",
                Some(&token),
                json!({"scores": {"1": 3.4, "2": 4.0, "3": 2.2, "4": 5.0, "5": 1.0}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(get_request("/api/responses", Some(&token)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["responses"][1]["answers"]["3"], 2.2);

        let id = record["id"].as_str().unwrap();
        let response = app
            .oneshot(get_request(&format!("/api/responses/{}", id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submitted_scores_are_stored_to_one_decimal() {
        let (app, _) = create_test_app(StubProvider::default());
        let token = signup(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/responses",
                Some(&token),
                json!({"scores": {"1": 3.456789, "2": 4.0, "3": 2.2, "4": 5.0, "5": 1.0}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let record = body_json(response).await;
        assert_eq!(record["answers"]["1"], 3.5);

        let response = app
            .clone()
            .oneshot(get_request("/api/responses", Some(&token)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["responses"][0]["answers"]["1"], 3.5);

        let response = app
            .oneshot(get_request("/api/dashboard", Some(&token)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["summary"]["latest"][0]["score"], 3.5);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_sheets() {
        let (app, _) = create_test_app(StubProvider::default());
        let token = signup(&app, "ada@example.com").await;

        let mut incomplete = full_answers(3);
        incomplete["2"].as_object_mut().unwrap().remove("5");

        for body in [
            json!({"answers": incomplete}),
            json!({"answers": full_answers(6)}),
            json!({"scores": {"1": 3.0}}),
            json!({}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/responses", Some(&token), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_users_cannot_see_each_other() {
        let (app, _) = create_test_app(StubProvider::default());
        let ada = signup(&app, "ada@example.com").await;
        let bob = signup(&app, "bob@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/responses",
                Some(&ada),
                json!({"answers": full_answers(2)}),
            ))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/responses/{}", id), Some(&bob)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get_request("/api/responses", Some(&bob)))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["total"], 0);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _) = create_test_app(StubProvider::default());
        let token = signup(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(get_request("/api/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["summary"], Value::Null);

        for value in [2, 4] {
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/responses",
                    Some(&token),
                    json!({"answers": full_answers(value)}),
                ))
                .await
                .unwrap();
        }

        let response = app
            .oneshot(get_request("/api/dashboard", Some(&token)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["summary"]["assessmentsTaken"], 2);
        assert_eq!(body["summary"]["overallAverage"], 3.0);
        assert_eq!(body["summary"]["latest"][0]["score"], 4.0);
        assert_eq!(body["summary"]["bandLabel"], "Fair");
    }
}
