//! Error types for each stage of a request and their HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures along the prompt → provider → parse → map pipeline.
#[derive(Error, Debug)]
pub enum GenerationError {
  #[error("LLM provider error: {0}")]
  Provider(String),
  #[error("Model reply is not valid JSON: {0}")]
  Parse(#[source] serde_json::Error),
  #[error("Model reply does not match the expected shape: {0}")]
  Mapping(#[source] serde_json::Error),
}

impl GenerationError {
  pub fn kind(&self) -> &'static str {
    match self {
      GenerationError::Provider(_) => "provider",
      GenerationError::Parse(_) => "parse",
      GenerationError::Mapping(_) => "mapping",
    }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProgressError {
  #[error("score must be between 0 and 100, got {0}")]
  ScoreOutOfRange(i64),
}

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{operation} failed: {source}")]
  Generation {
    operation: &'static str,
    #[source]
    source: GenerationError,
  },
  #[error(transparent)]
  Progress(#[from] ProgressError),
}

impl ApiError {
  pub fn generation(operation: &'static str) -> impl FnOnce(GenerationError) -> ApiError {
    move |source| ApiError::Generation { operation, source }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, kind) = match &self {
      ApiError::Generation { source, .. } => (StatusCode::INTERNAL_SERVER_ERROR, source.kind()),
      ApiError::Progress(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
    };
    (status, Json(json!({ "detail": self.to_string(), "kind": kind }))).into_response()
  }
}
