//! HTTP request handlers for the converter API.
//!
//! This module contains the conversion, health check, and metrics endpoints
//! plus the shared [`AppState`].

use crate::api::models::{ConvertRequest, ErrorResponse, HealthResponse};
use crate::core::config::AppConfig;
use crate::core::logging::get_request_id;
use crate::core::{AppError, Result};
use crate::services::{
    ChatCompletionsClient, ConversionResult, ConversionService, GenerationSettings, Target,
    TextGenerator,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

/// Shared application state.
///
/// Built once at startup and never mutated; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub converter: ConversionService,
}

impl AppState {
    /// Create state around an arbitrary generation backend.
    pub fn new(config: AppConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let settings = GenerationSettings::from(&config);
        Self {
            config,
            converter: ConversionService::new(generator, settings),
        }
    }

    /// Create state backed by the chat-completions client described in `config`.
    pub fn with_http_client(config: AppConfig, http_client: reqwest::Client) -> Self {
        let client = ChatCompletionsClient::new(
            http_client,
            config.llm.api_base.clone(),
            config.llm.api_key.clone(),
            config.request_timeout_secs,
        );
        Self::new(config, Arc::new(client))
    }
}

/// Rewrite text in the tone appropriate for the chosen audience.
#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "conversion",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Converted text", body = ConversionResult),
        (status = 400, description = "No text provided", body = ErrorResponse),
        (status = 500, description = "Upstream or configuration failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body))]
pub async fn convert(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = ConvertRequest::from_body(&body);
    let target = Target::resolve(request.target.as_deref());

    tracing::debug!(
        request_id = %get_request_id(),
        requested_target = ?request.target,
        target = %target,
        "Processing conversion request"
    );

    let text = request.text.as_deref().unwrap_or_default();
    match state.converter.convert(text, target).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response_with(state.config.error_details),
    }
}

/// Liveness check; never touches the upstream provider.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
#[tracing::instrument]
pub async fn health() -> Json<HealthResponse> {
    tracing::debug!(request_id = %get_request_id(), "Health check requested");
    Json(HealthResponse::healthy())
}

/// Prometheus metrics endpoint.
#[tracing::instrument]
pub async fn metrics_handler() -> Result<Response> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}
