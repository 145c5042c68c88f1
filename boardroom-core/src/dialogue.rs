//! Transcript and result types produced by a bounded dialogue.

use crate::{Timestamp, UsageReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Speaker name used for messages with no attribution.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

fn unknown_speaker() -> String {
    UNKNOWN_SPEAKER.to_string()
}

/// One attributed message of a dialogue. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DialogueTurn {
    #[serde(default = "unknown_speaker")]
    speaker: String,
    #[serde(default)]
    content: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl DialogueTurn {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// A message nobody claimed.
    pub fn unattributed(content: impl Into<String>) -> Self {
        Self::new(UNKNOWN_SPEAKER, content)
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Why a dialogue stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The turn cap was reached.
    MaxTurnsReached,
    /// A participant emitted the termination keyword.
    TerminationSignal,
}

/// Outcome of a completed dialogue run. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DialogueResult {
    dialogue_id: Uuid,
    transcript: Vec<DialogueTurn>,
    summary: String,
    usage: UsageReport,
    termination: TerminationReason,
}

impl DialogueResult {
    pub fn new(
        dialogue_id: Uuid,
        transcript: Vec<DialogueTurn>,
        summary: String,
        usage: UsageReport,
        termination: TerminationReason,
    ) -> Self {
        Self {
            dialogue_id,
            transcript,
            summary,
            usage,
            termination,
        }
    }

    pub fn dialogue_id(&self) -> Uuid {
        self.dialogue_id
    }

    /// Ordered transcript, opening message first.
    pub fn transcript(&self) -> &[DialogueTurn] {
        &self.transcript
    }

    /// Reflective summary requested after the dialogue ended.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Usage and cost as reported by the collaborator.
    pub fn usage(&self) -> &UsageReport {
        &self.usage
    }

    pub fn termination(&self) -> TerminationReason {
        self.termination
    }

    pub fn into_parts(self) -> (Uuid, Vec<DialogueTurn>, String, UsageReport, TerminationReason) {
        (
            self.dialogue_id,
            self.transcript,
            self.summary,
            self.usage,
            self.termination,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unattributed_turn_uses_unknown_speaker() {
        let turn = DialogueTurn::unattributed("hello");
        assert_eq!(turn.speaker(), UNKNOWN_SPEAKER);
        assert_eq!(turn.content(), "hello");
    }

    #[test]
    fn test_turn_deserializes_without_speaker() {
        let turn: DialogueTurn = serde_json::from_value(json!({"content": "orphan"})).unwrap();
        assert_eq!(turn.speaker(), UNKNOWN_SPEAKER);
        assert_eq!(turn.content(), "orphan");
    }

    #[test]
    fn test_termination_reason_serialization() {
        let json = serde_json::to_value(TerminationReason::MaxTurnsReached).unwrap();
        assert_eq!(json, json!("max_turns_reached"));
    }
}
