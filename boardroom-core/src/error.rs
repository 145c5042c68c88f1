//! Error types for Boardroom operations

use thiserror::Error;

/// Configuration errors.
///
/// Raised before any agent is built or any collaborator call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No API key configured: supply one interactively or via the environment")]
    MissingCredential,

    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Failures originating from the LLM collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Could not reach {provider}: {message}")]
    Transport { provider: String, message: String },

    #[error("Scripted provider {provider} has no replies left")]
    ScriptExhausted { provider: String },
}

/// Input validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Both dialogue participants are named {name}")]
    DuplicateParticipant { name: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },
}

/// Master error type for all Boardroom errors.
#[derive(Debug, Clone, Error)]
pub enum BoardroomError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl BoardroomError {
    /// True when the failure came from the external collaborator rather than
    /// from local configuration or input.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Llm(_))
    }
}

/// Result type alias for Boardroom operations.
pub type BoardroomResult<T> = Result<T, BoardroomError>;

// =============================================================================
// TESTS
// =============================================================================
