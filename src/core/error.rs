//! Error types and handling for the converter server.
//!
//! This module provides a unified error type [`AppError`] and the single place
//! where failures are translated into HTTP status codes and JSON bodies.

use crate::api::models::ErrorResponse;
use crate::core::config::ErrorDetailPolicy;
use crate::services::llm_client::LlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned for any missing or empty `text` field.
pub const NO_TEXT_PROVIDED: &str = "No text provided";

/// Message returned when the upstream generation call fails.
pub const CONVERSION_FAILED: &str = "Failed to process text conversion";

/// Message returned when no usable credential is configured.
pub const NOT_CONFIGURED: &str = "Service is not configured";

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client sent no usable text
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or invalid credential for the upstream provider
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network, provider, timeout or malformed-response failure upstream
    #[error("Upstream call failed: {0}")]
    ExternalCall(LlmError),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => {
                AppError::Configuration(LlmError::MissingCredential.to_string())
            }
            other => AppError::ExternalCall(other),
        }
    }
}

impl AppError {
    /// Shorthand for the missing-text validation failure.
    pub fn no_text() -> Self {
        AppError::InvalidInput(NO_TEXT_PROVIDED.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::ExternalCall(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Configuration(_) => "configuration",
            AppError::ExternalCall(_) => "external_call",
            AppError::Internal(_) => "internal",
        }
    }

    /// Build the client-facing body.
    ///
    /// The `error` field is always a fixed message; raw error text only
    /// appears in `details`, and only when the policy allows it.
    pub fn to_error_response(&self, policy: ErrorDetailPolicy) -> ErrorResponse {
        let (error, diagnostic) = match self {
            AppError::InvalidInput(msg) => (msg.clone(), None),
            AppError::Configuration(msg) => (NOT_CONFIGURED.to_string(), Some(msg.clone())),
            AppError::ExternalCall(e) => (CONVERSION_FAILED.to_string(), Some(e.to_string())),
            AppError::Internal(msg) => ("Internal server error".to_string(), Some(msg.clone())),
        };

        let details = match policy {
            ErrorDetailPolicy::Include => diagnostic,
            ErrorDetailPolicy::Omit => None,
        };

        ErrorResponse { error, details }
    }

    /// Convert into a response, honoring the configured detail policy.
    pub fn into_response_with(self, policy: ErrorDetailPolicy) -> Response {
        let status = self.status_code();
        (status, Json(self.to_error_response(policy))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(ErrorDetailPolicy::Omit)
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
