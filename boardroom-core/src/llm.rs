//! LLM-related primitive types.
//!
//! Pure data types exchanged with the LLM collaborator. The provider trait and
//! concrete clients live in boardroom-llm.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// MESSAGES
// ============================================================================

/// Role of a message within a chat request, relative to the agent answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message of the history handed to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    /// Participant that authored the message, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            name: None,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            name: None,
            content: content.into(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A single request/response cycle against the collaborator.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub request_id: Uuid,
    /// Name of the agent that will author the reply.
    pub agent: String,
    /// Behavioral directive, sent as the system message.
    pub system: String,
    /// Ordered history, oldest first.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(agent: impl Into<String>, system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            agent: agent.into(),
            system: system.into(),
            messages,
        }
    }
}

// ============================================================================
// REPLIES
// ============================================================================

/// Reply shape returned by a collaborator.
///
/// Collaborators answer either with bare text or with a structured object
/// whose textual field may be missing. Call [`Reply::normalize`] at the
/// boundary so nothing downstream has to inspect the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Text {
        value: String,
    },
    Structured {
        content: Option<String>,
        #[serde(default)]
        metadata: serde_json::Value,
    },
}

impl Reply {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Collapse the reply into plain text plus optional metadata.
    ///
    /// A structured reply without content becomes an empty string.
    pub fn normalize(self) -> NormalizedReply {
        match self {
            Self::Text { value } => NormalizedReply {
                text: value,
                metadata: None,
                content_missing: false,
            },
            Self::Structured { content, metadata } => NormalizedReply {
                content_missing: content.is_none(),
                text: content.unwrap_or_default(),
                metadata: (!metadata.is_null()).then_some(metadata),
            },
        }
    }
}

/// A reply reduced to plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    pub text: String,
    pub metadata: Option<serde_json::Value>,
    /// Set when a structured reply lacked its textual field.
    pub content_missing: bool,
}

/// Token accounting reported by the collaborator for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Everything the collaborator returned for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub reply: Reply,
    pub usage: Option<TokenUsage>,
    /// Model that actually served the request.
    pub model: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_reply_normalizes_to_value() {
        let normalized = Reply::text("Strategy A").normalize();
        assert_eq!(normalized.text, "Strategy A");
        assert_eq!(normalized.metadata, None);
        assert!(!normalized.content_missing);
    }

    #[test]
    fn test_structured_reply_keeps_content_and_metadata() {
        let reply = Reply::Structured {
            content: Some("Go B2B".to_string()),
            metadata: json!({"finish_reason": "stop"}),
        };
        let normalized = reply.normalize();
        assert_eq!(normalized.text, "Go B2B");
        assert_eq!(normalized.metadata, Some(json!({"finish_reason": "stop"})));
        assert!(!normalized.content_missing);
    }

    #[test]
    fn test_structured_reply_without_content_is_empty() {
        let reply = Reply::Structured {
            content: None,
            metadata: serde_json::Value::Null,
        };
        let normalized = reply.normalize();
        assert_eq!(normalized.text, "");
        assert_eq!(normalized.metadata, None);
        assert!(normalized.content_missing);
    }

    #[test]
    fn test_reply_tagged_serialization() {
        let json = serde_json::to_value(Reply::text("hi")).unwrap();
        assert_eq!(json, json!({"kind": "text", "value": "hi"}));

        let parsed: Reply =
            serde_json::from_value(json!({"kind": "structured", "content": null})).unwrap();
        assert_eq!(
            parsed,
            Reply::Structured {
                content: None,
                metadata: serde_json::Value::Null
            }
        );
    }

    #[test]
    fn test_chat_message_builders() {
        let msg = ChatMessage::user("hello").named("CEO");
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.name.as_deref(), Some("CEO"));
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }
}
