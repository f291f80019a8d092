//! Common API handler utilities.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::models::ErrorResponse;

/// Result type for handlers that answer with a JSON body.
pub type HandlerResult<T> = Result<Json<T>, ErrorResponse>;

/// Result type for handlers that answer 201 Created.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), ErrorResponse>;

/// Result type for utility functions that return parsed values.
pub type ExtractResult<T> = Result<T, ErrorResponse>;

/// Wrap a value as a successful JSON response.
pub fn ok<T: Serialize>(data: T) -> HandlerResult<T> {
    Ok(Json(data))
}

pub fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(data)))
}

/// `{"message": ...}` body.
pub fn message(text: impl Into<String>) -> HandlerResult<Value> {
    ok(json!({ "message": text.into() }))
}

/// Unwrap a JSON body, turning a rejection into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ExtractResult<T> {
    payload.map(|Json(body)| body).map_err(ErrorResponse::from)
}

/// Parse a raw body for a route that picks its body type at runtime.
/// An empty body reads as `{}`.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> ExtractResult<T> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ErrorResponse::bad_request(format!("Invalid request body: {}", e)))
}

/// Extract a path parameter or return a 400 error.
pub fn extract_path<T>(value: &str) -> ExtractResult<T>
where
    T: std::str::FromStr,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ErrorResponse::bad_request(format!("Invalid path parameter: {}", value)))
}
