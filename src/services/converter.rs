//! Tone conversion: persona prompt selection, the upstream call, and output
//! normalization.

use crate::core::config::AppConfig;
use crate::core::error::{AppError, Result};
use crate::core::logging::get_request_id;
use crate::core::metrics::get_metrics;
use crate::services::llm_client::{ChatMessage, GenerationRequest, LlmError, TextGenerator};
use crate::services::persona::Target;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

/// Successful conversion payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "original": "내일 회의 못 갈 것 같아요",
    "converted": "죄송하지만 내일 회의에는 참석이 어려울 것 같습니다.",
    "target": "boss"
}))]
pub struct ConversionResult {
    /// Input text, echoed unchanged
    pub original: String,
    /// Rewritten text
    pub converted: String,
    /// Resolved audience
    pub target: Target,
}

/// Model parameters used for every conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&AppConfig> for GenerationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Stateless conversion pipeline shared by all requests.
#[derive(Clone)]
pub struct ConversionService {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl ConversionService {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Build the system + user exchange for `target`.
    pub fn build_request(&self, text: &str, target: Target) -> GenerationRequest {
        GenerationRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(target.system_prompt()),
                ChatMessage::user(text),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Rewrite `text` for `target`.
    ///
    /// Blank text is rejected before any upstream call. Upstream failures are
    /// not retried.
    #[tracing::instrument(skip(self, text, target), fields(target = %target, chars = text.chars().count()))]
    pub async fn convert(&self, text: &str, target: Target) -> Result<ConversionResult> {
        let metrics = get_metrics();

        if text.trim().is_empty() {
            metrics
                .conversions
                .with_label_values(&[target.as_str(), "invalid_input"])
                .inc();
            return Err(AppError::no_text());
        }

        let request = self.build_request(text, target);
        let start = Instant::now();

        let generated = match tokio::time::timeout(
            self.settings.timeout,
            self.generator.generate(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.settings.timeout.as_secs())),
        };

        let elapsed = start.elapsed().as_secs_f64();
        metrics
            .upstream_latency
            .with_label_values(&[self.settings.model.as_str()])
            .observe(elapsed);

        match generated {
            Ok(raw) => {
                metrics
                    .conversions
                    .with_label_values(&[target.as_str(), "success"])
                    .inc();
                tracing::debug!(
                    request_id = %get_request_id(),
                    model = %self.settings.model,
                    elapsed_secs = elapsed,
                    "Conversion completed"
                );
                Ok(ConversionResult {
                    original: text.to_string(),
                    converted: normalize_output(&raw),
                    target,
                })
            }
            Err(e) => {
                let err = AppError::from(e);
                metrics
                    .conversions
                    .with_label_values(&[target.as_str(), err.kind()])
                    .inc();
                tracing::error!(
                    request_id = %get_request_id(),
                    model = %self.settings.model,
                    error = %err,
                    "Conversion failed"
                );
                Err(err)
            }
        }
    }
}

/// Trim the generated text and drop one enclosing pair of matching straight
/// quotes.
///
/// Only a single outer `"…"` or `'…'` pair is removed; inner or mismatched
/// quotes are left alone.
pub fn normalize_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            trimmed[1..trimmed.len() - 1].to_string()
        }
        _ => trimmed.to_string(),
    }
}
