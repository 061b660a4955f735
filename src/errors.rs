use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Text shown in the chat transcript when a turn fails against the provider.
    pub fn chat_notice(&self) -> String {
        match self {
            AppError::RateLimited(_) => {
                "⚠️ Rate limit reached. Please wait a moment before trying again.".to_string()
            }
            AppError::Upstream { status, message } => format!("API error {}: {}", status, message),
            AppError::Network(msg) | AppError::Decode(msg) => {
                format!("Unexpected API error: {}", msg)
            }
            other => format!("Unhandled error while calling the assistant: {}", other),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RateLimited("slow down".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Configuration("missing key".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("persona".into());
        assert_eq!(err.to_string(), "Not found: persona");

        let err = AppError::Upstream {
            status: 500,
            message: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "Upstream error 500: overloaded");
    }

    #[test]
    fn test_chat_notices() {
        assert_eq!(
            AppError::RateLimited("429".into()).chat_notice(),
            "⚠️ Rate limit reached. Please wait a moment before trying again."
        );
        assert_eq!(
            AppError::Upstream {
                status: 400,
                message: "bad tool".into()
            }
            .chat_notice(),
            "API error 400: bad tool"
        );
        assert_eq!(
            AppError::Network("connection reset".into()).chat_notice(),
            "Unexpected API error: connection reset"
        );
        assert!(AppError::InternalError("boom".into())
            .chat_notice()
            .starts_with("Unhandled error while calling the assistant:"));
    }

    #[test]
    fn test_error_response_body_carries_code() {
        let response = AppError::ValidationError("empty prompt".into()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
