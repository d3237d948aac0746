use std::sync::Arc;
use tracing::warn;

use crate::api_connection::connection::{BackendError, OllamaBackend};
use crate::dataset::RecipeStore;
use crate::fallback::fallback_response;
use crate::matcher::{find_by_ingredients, parse_ingredients, DEFAULT_MAX_RESULTS};
use crate::prompt::build_prompt;

/// Ties matching, prompt building, and the model backend together. Stateless
/// per request apart from the shared read-only dataset, so one engine serves
/// any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct RecipeEngine {
    store: Arc<RecipeStore>,
    backend: OllamaBackend,
    max_recipe_context: usize,
}

impl RecipeEngine {
    pub fn new(store: Arc<RecipeStore>, backend: OllamaBackend) -> Self {
        Self {
            store,
            backend,
            max_recipe_context: DEFAULT_MAX_RESULTS,
        }
    }

    /// Caps how many matched recipes go into the prompt.
    pub fn with_max_recipe_context(mut self, max_recipe_context: usize) -> Self {
        self.max_recipe_context = max_recipe_context;
        self
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Produces a recipe suggestion for a free-text message. Always returns
    /// an answer: one failed backend attempt switches to the deterministic
    /// fallback instead of surfacing the error.
    pub async fn suggest(&self, user_message: &str) -> String {
        let tokens = parse_ingredients(user_message);
        let matches = find_by_ingredients(self.store.get_all(), &tokens, self.max_recipe_context, 1);

        // The full-dataset sample is only offered when nothing matched, which
        // keeps grounded prompts bounded by max_recipe_context.
        let sample = if matches.is_empty() {
            Some(self.store.get_all())
        } else {
            None
        };
        let (system, user_prompt) = build_prompt(user_message, &matches, sample);

        match self.backend.chat(&system, &user_prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                match &err {
                    BackendError::ModelNotFound(model) => {
                        warn!(model = %model, "requested model missing on backend, answering with fallback");
                    }
                    BackendError::Unreachable(source) => {
                        warn!(error = %source, "model backend unreachable, answering with fallback");
                    }
                    BackendError::ApiError { status, .. } => {
                        warn!(%status, "model backend call failed, answering with fallback");
                    }
                }
                fallback_response(&matches, user_message)
            }
        }
    }
}
