//! Basic handlers - health check and fallbacks.

use axum::Json;
use serde_json::json;

use crate::models::ErrorResponse;

/// Basic health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "irhub",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Answer for a known route called with an unsupported verb.
pub async fn method_not_allowed_handler() -> ErrorResponse {
    ErrorResponse::method_not_allowed()
}

/// Answer for an unknown route.
pub async fn not_found_handler() -> ErrorResponse {
    ErrorResponse::not_found("Endpoint")
}
