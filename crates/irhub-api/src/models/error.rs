//! Unified error handling for the API.

use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

use irhub_commands::DispatchError;

/// Unified API error response with proper HTTP status codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code.
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    /// Bad request (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message, StatusCode::BAD_REQUEST)
    }

    /// Not found (404).
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("{} not found", resource.into()),
            StatusCode::NOT_FOUND,
        )
    }

    /// Method not allowed (405).
    pub fn method_not_allowed() -> Self {
        Self::new(
            "METHOD_NOT_ALLOWED",
            "Method not allowed",
            StatusCode::METHOD_NOT_ALLOWED,
        )
    }

    /// Request body over the size cap (413).
    pub fn payload_too_large() -> Self {
        Self::new(
            "PAYLOAD_TOO_LARGE",
            "Request body too large",
            StatusCode::PAYLOAD_TOO_LARGE,
        )
    }

    /// Internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = serde_json::json!({
            "success": false,
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl From<irhub_core::Error> for ErrorResponse {
    fn from(e: irhub_core::Error) -> Self {
        match e {
            irhub_core::Error::Validation(msg) => Self::bad_request(msg),
            irhub_core::Error::NotFound(what) => Self::not_found(what),
            other => {
                tracing::error!(error = %other, "Request failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl From<DispatchError> for ErrorResponse {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Validation(msg) => Self::bad_request(msg),
            DispatchError::DeviceNotFound(_) => Self::not_found("Device"),
            DispatchError::CommandUnsupported { .. } => Self::bad_request(e.to_string()),
            DispatchError::Storage(inner) => inner.into(),
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large();
        }
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<BytesRejection> for ErrorResponse {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large();
        }
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ErrorResponse>;
