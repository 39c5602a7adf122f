//! API request and response models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "BizTone Converter API";

/// Conversion request body.
///
/// `text` is required; a body without a usable `text` is rejected with 400
/// rather than a deserialization error. An unknown `target` falls back to
/// `boss`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "text": "내일 회의 못 갈 것 같아요",
    "target": "boss"
}))]
pub struct ConvertRequest {
    /// Text to rewrite
    #[serde(default)]
    #[schema(required = true, nullable = false)]
    pub text: Option<String>,

    /// One of "boss", "colleague", "client"
    #[serde(default)]
    pub target: Option<String>,
}

impl ConvertRequest {
    /// Read a request body leniently.
    ///
    /// An empty or non-JSON body, a non-object document, or fields of the
    /// wrong type all yield `None` for the affected fields instead of a
    /// deserialization error.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(|s| s.to_string())
        };
        Self {
            text: field("text"),
            target: field("target"),
        }
    }
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Failed to process text conversion"
}))]
pub struct ErrorResponse {
    /// Human-readable, stable message
    pub error: String,

    /// Diagnostic text; not stable, do not parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "service": "BizTone Converter API"
}))]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}
