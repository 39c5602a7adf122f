//! Router assembly and OpenAPI documentation.

use crate::api::handlers::{convert, health, metrics_handler, AppState};
use crate::api::models::{ConvertRequest, ErrorResponse, HealthResponse};
use crate::core::{request_id_middleware, MetricsMiddleware};
use crate::services::{ConversionResult, Target};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the public endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BizTone Converter API",
        description = "Rewrites plain text into a business tone for a chosen audience"
    ),
    paths(crate::api::handlers::convert, crate::api::handlers::health),
    components(schemas(ConvertRequest, ConversionResult, ErrorResponse, HealthResponse, Target)),
    tags(
        (name = "conversion", description = "Tone conversion"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/convert", post(convert))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(axum::middleware::from_fn(MetricsMiddleware::track_metrics))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
