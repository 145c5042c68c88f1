//! Boardroom Core - Entity Types
//!
//! Pure data structures shared by every Boardroom crate: model configuration,
//! agent descriptors, dialogue transcripts, the tagged collaborator reply and
//! the error taxonomy. No network access and no orchestration live here.

use chrono::{DateTime, Utc};

mod agent;
mod config;
mod dialogue;
mod error;
mod llm;
mod usage;

pub use agent::AgentDescriptor;
pub use config::ModelConfig;
pub use dialogue::{DialogueResult, DialogueTurn, TerminationReason, UNKNOWN_SPEAKER};
pub use error::{BoardroomError, BoardroomResult, ConfigError, LlmError, ValidationError};
pub use llm::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, NormalizedReply, Reply, TokenUsage,
};
pub use usage::{ModelUsage, UsageReport};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
