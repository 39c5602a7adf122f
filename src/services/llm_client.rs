//! Client for the upstream text-generation capability.
//!
//! The service only depends on the [`TextGenerator`] trait. The production
//! implementation, [`ChatCompletionsClient`], speaks the OpenAI-compatible
//! `/chat/completions` protocol that Groq exposes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use std::time::Duration;
use thiserror::Error;

/// Upstream error bodies are truncated to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Failure of a single generation call.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No usable API key was configured at startup
    #[error("no API key configured for the text generation provider")]
    MissingCredential,

    /// The call did not finish within the configured bound
    #[error("provider did not respond within {0} seconds")]
    Timeout(u64),

    /// Connection, TLS or other transport failure
    #[error("request to provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered 2xx with a body we could not interpret
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// Provider answered without any generated text
    #[error("provider returned no generated text")]
    EmptyResponse,
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything the provider needs for one completion.
///
/// Serializes directly into the chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Opaque text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text of the first choice.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its pool.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http_client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl ChatCompletionsClient {
    pub fn new(
        http_client: reqwest::Client,
        api_base: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn map_transport_error(&self, url: &str, e: reqwest::Error) -> LlmError {
        tracing::error!(
            url = %url,
            error = %e,
            error_source = ?e.source(),
            is_timeout = e.is_timeout(),
            is_connect = e.is_connect(),
            "HTTP request failed to provider"
        );
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Transport(e)
        }
    }
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("api_base", &self.api_base)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;
        let url = self.endpoint();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&url, e))?;

        let status = response.status();
        tracing::debug!(url = %url, status = %status, model = %request.model, "HTTP request completed");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(&url, e))?;
        parse_completion(&bytes)
    }
}

/// Extract the first choice's content from a chat-completions body.
fn parse_completion(body: &[u8]) -> Result<String, LlmError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_slice(body).map_err(|e| LlmError::Malformed(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Malformed("response has no choices".to_string()))?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(LlmError::EmptyResponse),
    }
}
