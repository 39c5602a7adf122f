//! Business logic services for the converter.
//!
//! This module contains the persona table, the upstream generation client,
//! and the conversion pipeline that ties them together.

pub mod converter;
pub mod llm_client;
pub mod persona;

// Re-export commonly used types
pub use converter::{normalize_output, ConversionResult, ConversionService, GenerationSettings};
pub use llm_client::{ChatCompletionsClient, ChatMessage, GenerationRequest, LlmError, Role, TextGenerator};
pub use persona::Target;
