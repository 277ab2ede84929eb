//! Generation client: send a prompt to the LLM provider and, when JSON is
//! expected, strip markdown fences and parse the reply.
//!
//! This is a single call-and-return step. There are no retries: a failed or
//! malformed completion goes straight back to the caller.

use std::{future::Future, pin::Pin, sync::Arc};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::error::GenerationError;
use crate::mapper::map_value;
use crate::util::trunc_for_log;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A text-completion backend. One prompt in, one completion out.
pub trait CompletionProvider: Send + Sync {
  fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>>;

  /// Short label for logs.
  fn name(&self) -> &str;
}

/// What `generate` hands back: raw text, or the parsed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
  Text(String),
  Json(Value),
}

#[derive(Clone)]
pub struct GenerationClient {
  provider: Arc<dyn CompletionProvider>,
}

impl GenerationClient {
  pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
    Self { provider }
  }

  #[instrument(level = "info", skip(self, prompt), fields(provider = %self.provider.name(), prompt_len = prompt.len()))]
  pub async fn generate(&self, prompt: &str, expect_json: bool) -> Result<Completion, GenerationError> {
    let raw = self.provider.complete(prompt).await?;
    let text = raw.trim();
    if !expect_json {
      return Ok(Completion::Text(text.to_string()));
    }

    let body = strip_code_fence(text);
    match serde_json::from_str::<Value>(body) {
      Ok(v) => Ok(Completion::Json(v)),
      Err(e) => {
        error!(target: "generation", error = %e, reply = %trunc_for_log(body, 200), "Model reply is not valid JSON");
        Err(GenerationError::Parse(e))
      }
    }
  }

  /// Generate, parse and map into `T` in one go.
  pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, GenerationError> {
    let value = match self.generate(prompt, true).await? {
      Completion::Json(v) => v,
      Completion::Text(t) => Value::String(t),
    };
    let mapped = map_value(value);
    if let Err(e) = &mapped {
      debug!(target: "generation", error = %e, "Model reply failed to map onto result type");
    }
    mapped
  }
}

/// Strip a leading markdown code fence.
///
/// If the text starts with "```", keep only the segment up to the next "```"
/// (or the end), then drop a leading `json` language tag.
pub fn strip_code_fence(text: &str) -> &str {
  let Some(inner) = text.strip_prefix("```") else {
    return text.trim();
  };
  let segment = match inner.find("```") {
    Some(end) => &inner[..end],
    None => inner,
  };
  segment.strip_prefix("json").unwrap_or(segment).trim()
}

#[cfg(test)]
pub mod testing {
  //! Scripted provider for tests.

  use std::collections::VecDeque;
  use std::sync::Mutex;

  use super::*;

  /// Replays queued replies in order and records every prompt it was given.
  #[derive(Default)]
  pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub prompts: Mutex<Vec<String>>,
  }

  impl ScriptedProvider {
    pub fn new() -> Self {
      Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
      self.replies.lock().unwrap().push_back(Ok(text.into()));
      self
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
      self.replies.lock().unwrap().push_back(Err(message.into()));
      self
    }

    pub fn seen_prompts(&self) -> Vec<String> {
      self.prompts.lock().unwrap().clone()
    }
  }

  impl CompletionProvider for ScriptedProvider {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
      self.prompts.lock().unwrap().push(prompt.to_string());
      let next = self.replies.lock().unwrap().pop_front();
      Box::pin(async move {
        match next {
          Some(Ok(text)) => Ok(text),
          Some(Err(msg)) => Err(GenerationError::Provider(msg)),
          None => Err(GenerationError::Provider("no scripted reply left".into())),
        }
      })
    }

    fn name(&self) -> &str {
      "scripted"
    }
  }
}
