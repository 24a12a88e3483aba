// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::access::AccessError;
use crate::auth::providers::ProviderError;
use crate::database::StoreError;

/// Status used for authenticated callers acting on someone else's resource.
/// Clients of this API expect 401 here rather than 403.
pub const FORBIDDEN_STATUS: u16 = 401;

/// HTTP API error with status code and client-facing message
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidContent,
    PersistenceFailure(String),

    // 401 Unauthorized
    InvalidToken,

    // FORBIDDEN_STATUS
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::InvalidContent => 400,
            ApiError::PersistenceFailure(_) => 400,
            ApiError::InvalidToken => 401,
            ApiError::Forbidden(_) => FORBIDDEN_STATUS,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidContent => "Invalid content",
            ApiError::PersistenceFailure(msg) => msg,
            ApiError::InvalidToken => "Invalid token",
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidContent => "INVALID_CONTENT",
            ApiError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "message": self.message()
            }
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => ApiError::InvalidToken,
            AccessError::NotFound(kind) => ApiError::NotFound(format!("{} not found", kind)),
            AccessError::Forbidden(reason) => ApiError::Forbidden(reason.to_string()),
            AccessError::InvalidContent => ApiError::InvalidContent,
            AccessError::InvalidUserId => ApiError::bad_request("Invalid user id"),
            e @ AccessError::PersistenceFailure { .. } => ApiError::PersistenceFailure(e.to_string()),
            AccessError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Don't expose storage internals to clients
        tracing::error!("Store error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(_) | ProviderError::NotConfigured(_) => {
                ApiError::not_found(err.to_string())
            }
            other => {
                tracing::error!("Provider configuration error: {}", other);
                ApiError::internal_server_error("Login providers unavailable")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), "{}", self.message());
        } else {
            tracing::debug!(code = self.error_code(), status = status.as_u16(), "{}", self.message());
        }
        (status, Json(self.to_json())).into_response()
    }
}
