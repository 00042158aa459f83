use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// Reasons the engine leaves a URL as given.
///
/// None of these is ever surfaced to the emission pipeline: each one resolves
/// to "pass the URL through unchanged" (or "treat as empty" for directory
/// failures). They exist for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("static host is not configured")]
    NotInitialized,

    #[error("directory query failed: {0}")]
    DirectoryQueryFailed(String),

    #[error("malformed URL: {0}")]
    MalformedUrl(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotConfigured { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_configured(message: impl Into<String>, details: Value) -> Self {
        Self::NotConfigured {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotConfigured { message, details } => {
                (StatusCode::NOT_FOUND, "not_configured", message, details)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Error payload for embedding in batch responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, code, message, _) = self.parts();
        write!(f, "{}: {}", code, message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_configured("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_info() {
        let info = AppError::not_configured("Static host is not configured", json!({}))
            .to_error_info();

        assert_eq!(info.code, "not_configured");
        assert_eq!(info.message, "Static host is not configured");
    }

    #[test]
    fn test_display() {
        let err = AppError::bad_request("Bad scheme", json!({}));
        assert_eq!(err.to_string(), "validation_error: Bad scheme");
    }
}
