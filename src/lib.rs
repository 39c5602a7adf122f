//! BizTone Converter - rewrites plain text into a business tone
//!
//! A small HTTP backend that takes a piece of text and a target audience
//! (boss, colleague or client), sends it to an OpenAI-compatible
//! chat-completions provider together with an audience-specific system prompt,
//! and returns the rewritten text.
//!
//! # Architecture
//!
//! - [`core`]: Configuration, errors, logging context, metrics, middleware
//! - [`api`]: HTTP handlers, request/response models, router
//! - [`services`]: Persona table, upstream client, conversion pipeline
//!
//! # Configuration
//!
//! Required for conversions to succeed:
//! - `GROQ_API_KEY`: Provider API key (stray quotes and whitespace are trimmed)
//!
//! Optional environment variables:
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `GROQ_API_BASE`: Provider base URL (default: Groq's OpenAI-compatible endpoint)
//! - `GROQ_MODEL`: Model identifier (default: llama3-8b-8192)
//! - `LLM_TEMPERATURE`: Sampling temperature (default: 0.3)
//! - `LLM_MAX_TOKENS`: Output token cap (default: 500)
//! - `REQUEST_TIMEOUT_SECS`: Upstream call timeout in seconds (default: 30)
//! - `VERIFY_SSL`: Verify SSL certificates for upstream (default: true)
//! - `ERROR_DETAILS`: `include` to return diagnostic details on errors (default: omit)

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::api::{build_router, AppState, ApiDoc};
pub use crate::core::{AppConfig, AppError, ErrorDetailPolicy, Result};
pub use crate::services::{ConversionResult, ConversionService, Target, TextGenerator};
