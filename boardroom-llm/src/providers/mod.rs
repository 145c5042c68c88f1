//! LLM provider implementations
//!
//! Concrete [`ChatProvider`](crate::ChatProvider) implementations for real
//! services, plus the error constructors they share.

pub mod openai;

pub use openai::{OpenAIClient, OpenAiChatProvider};

use boardroom_core::{BoardroomError, LlmError};

pub(crate) fn request_failed(provider: &str, status: i32, message: impl Into<String>) -> BoardroomError {
    BoardroomError::Llm(LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    })
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> BoardroomError {
    BoardroomError::Llm(LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    })
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> BoardroomError {
    BoardroomError::Llm(LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}

pub(crate) fn transport(provider: &str, message: impl Into<String>) -> BoardroomError {
    BoardroomError::Llm(LlmError::Transport {
        provider: provider.to_string(),
        message: message.into(),
    })
}
