//! Error Types for the Boardroom API
//!
//! This module defines error handling for the HTTP layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boardroom_core::{BoardroomError, ConfigError, LlmError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur while serving a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Request Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Field value is out of valid range
    InvalidRange,

    /// No API key was supplied and none is configured
    MissingCredential,

    // ========================================================================
    // Collaborator Errors (429, 502)
    // ========================================================================
    /// The language model provider rate limited us
    UpstreamRateLimited,

    /// The language model provider failed or could not be reached
    UpstreamFailure,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::InvalidRange
            | ErrorCode::MissingCredential => StatusCode::BAD_REQUEST,

            ErrorCode::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,

            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::InvalidRange => "Value is out of valid range",
            ErrorCode::MissingCredential => "No API key configured",
            ErrorCode::UpstreamRateLimited => "The language model provider is rate limiting requests",
            ErrorCode::UpstreamFailure => "The language model provider request failed",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message, including the underlying cause
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a ServiceUnavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        let code = match err {
            ConfigError::MissingCredential => ErrorCode::MissingCredential,
            ConfigError::MissingRequired { .. } => ErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ErrorCode::InvalidInput,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::RequiredFieldMissing { .. } => ErrorCode::MissingField,
            ValidationError::OutOfRange { .. } => ErrorCode::InvalidRange,
            ValidationError::InvalidValue { .. } | ValidationError::DuplicateParticipant { .. } => {
                ErrorCode::InvalidInput
            }
        };
        ApiError::new(code, err.to_string())
    }
}

/// Collaborator failures keep their cause text but are reported generically.
impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        tracing::error!(error = %err, "Language model collaborator failed");

        let (code, provider) = match &err {
            LlmError::RateLimited { provider, .. } => (ErrorCode::UpstreamRateLimited, provider),
            LlmError::RequestFailed { provider, .. }
            | LlmError::InvalidResponse { provider, .. }
            | LlmError::Transport { provider, .. }
            | LlmError::ScriptExhausted { provider } => (ErrorCode::UpstreamFailure, provider),
        };
        ApiError::new(code, format!("The agents could not finish: {}", err))
            .with_details(serde_json::json!({ "provider": provider }))
    }
}

impl From<BoardroomError> for ApiError {
    fn from(err: BoardroomError) -> Self {
        match err {
            BoardroomError::Config(e) => e.into(),
            BoardroomError::Validation(e) => e.into(),
            BoardroomError::Llm(e) => e.into(),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
