//! Application state: prompt templates, the optional LLM client and the
//! progress store.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::{load_app_config_from_env, Prompts};
use crate::error::GenerationError;
use crate::gemini::Gemini;
use crate::generation::GenerationClient;
use crate::progress::{InMemoryProgressStore, ProgressStore};

#[derive(Clone)]
pub struct AppState {
    pub llm: Option<GenerationClient>,
    pub prompts: Prompts,
    pub progress: Arc<dyn ProgressStore>,
}

impl AppState {
    /// Build state from env: load prompt config, init Gemini, create an empty progress store.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_app_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let llm = Gemini::from_env().map(|g| {
            info!(target: "langgpt_backend", base_url = %g.base_url, model = %g.model, timeout = ?g.timeout, "Gemini enabled.");
            GenerationClient::new(Arc::new(g))
        });
        if llm.is_none() {
            warn!(target: "langgpt_backend", "Gemini disabled (no GEMINI_API_KEY). Generation endpoints will fail; progress still works.");
        }

        Self::with_parts(llm, prompts, Arc::new(InMemoryProgressStore::new()))
    }

    pub fn with_parts(llm: Option<GenerationClient>, prompts: Prompts, progress: Arc<dyn ProgressStore>) -> Self {
        Self { llm, prompts, progress }
    }

    /// The configured generation client, or a provider error if none is set up.
    pub fn generation(&self) -> Result<&GenerationClient, GenerationError> {
        self.llm
            .as_ref()
            .ok_or_else(|| GenerationError::Provider("GEMINI_API_KEY is not configured".into()))
    }
}
