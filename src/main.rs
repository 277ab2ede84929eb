//! LangGpt · Nigerian language learning backend (Igbo, Yoruba, Hausa)
//!
//! - Axum HTTP API: lessons, translation, quizzes, conversation practice, progress
//! - Content generated by Gemini (via environment variables)
//! - In-memory progress tracking with next-topic recommendation
//!
//! Important env variables (a `.env` file is honored):
//!   PORT                : u16 (default 8000)
//!   GEMINI_API_KEY      : enables generation endpoints if present
//!   GEMINI_BASE_URL     : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL        : default "gemini-2.5-flash-lite"
//!   GEMINI_TIMEOUT_SECS : request timeout, default 30
//!   PROMPTS_CONFIG_PATH : path to TOML file overriding prompt templates
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod gemini;
mod generation;
mod logic;
mod mapper;
mod progress;
mod prompts;
mod protocol;
mod routes;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  dotenvy::dotenv().ok();
  telemetry::init_tracing();

  // Shared application state (prompt templates, Gemini client, progress store).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "langgpt_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "langgpt_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "langgpt_backend", "Shutdown signal received");
}
