//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - lesson/translation endpoints under `/lessons`
/// - quiz endpoints under `/quiz`
/// - the conversation tutor at `/conversation`
/// - progress tracking under `/progress`
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_root))
        .route("/health", get(http::http_health))
        // Lessons
        .route("/lessons", post(http::http_post_lesson))
        .route("/lessons/translate", post(http::http_post_translate))
        .route("/lessons/topics", get(http::http_get_topics))
        .route("/lessons/languages", get(http::http_get_languages))
        // Quiz
        .route("/quiz", post(http::http_post_quiz))
        .route("/quiz/check", post(http::http_post_check_answer))
        // Conversation
        .route("/conversation", post(http::http_post_conversation))
        // Progress
        .route("/progress/update", post(http::http_post_progress_update))
        .route("/progress/:user_id/:language", get(http::http_get_progress))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
