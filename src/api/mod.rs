//! API layer for the converter server.
//!
//! This module contains the HTTP handlers, request/response models, and
//! router assembly.

pub mod handlers;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use handlers::{convert, health, metrics_handler, AppState};
pub use models::{ConvertRequest, ErrorResponse, HealthResponse, SERVICE_NAME};
pub use routes::{build_router, ApiDoc};
