use reqwest::Client;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

#[derive(Debug)]
pub enum BackendError {
    /// Transport-level failure: backend down, connection refused, timeout,
    /// or an unreadable response body.
    Unreachable(reqwest::Error),
    /// Backend is up but does not have the requested model.
    ModelNotFound(String),
    /// Any other non-success response from the backend.
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unreachable(err) => {
                write!(f, "Model backend unreachable: {}", err)
            }
            BackendError::ModelNotFound(model) => {
                write!(
                    f,
                    "Model '{}' not found on the backend. Pull it first, e.g.: ollama run {}",
                    model, model
                )
            }
            BackendError::ApiError { status, error_body } => {
                write!(f, "Model backend error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BackendError::Unreachable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Unreachable(err)
    }
}

/// Client for a local Ollama server. One chat call per `suggest` request,
/// no retries; the timeout is owned here by configuration, not by the engine.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    base_url: String,
    model: String,
    timeout: Duration,
    client: Client,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout,
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one (system, user) message pair to `POST /api/chat` and returns
    /// the generated text.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            stream: false,
            options: None,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let chat_response = response.json::<ChatCompletionResponse>().await?;
            Ok(chat_response.message.content)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            // Ollama reports a missing model as 404 with an error body like
            // "model 'x' not found"
            if status == reqwest::StatusCode::NOT_FOUND && error_body.contains("not found") {
                Err(BackendError::ModelNotFound(self.model.clone()))
            } else {
                Err(BackendError::ApiError { status, error_body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::ModelNotFound("llama3.2:1b".to_string());
        let message = err.to_string();
        assert!(message.contains("llama3.2:1b"));
        assert!(message.contains("not found"));

        let err = BackendError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            error_body: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_chat_against_unreachable_backend() {
        // nothing listens on port 1
        let backend = OllamaBackend::new(
            "http://127.0.0.1:1",
            "llama3.2:1b",
            Duration::from_millis(250),
        );
        let result = backend.chat("system", "user").await;
        assert!(matches!(result, Err(BackendError::Unreachable(_))));
    }
}
