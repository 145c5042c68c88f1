//! Transcript rendering: speaker names to display tags.

use boardroom_core::{DialogueTurn, UNKNOWN_SPEAKER};
use serde::{Deserialize, Serialize};

/// Visual tag attached to a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SpeakerTag {
    Cmo,
    Ceo,
    Default,
}

impl SpeakerTag {
    /// Exact, case-sensitive match on the speaker name.
    pub fn for_speaker(speaker: &str) -> Self {
        match speaker {
            "CMO" => Self::Cmo,
            "CEO" => Self::Ceo,
            _ => Self::Default,
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Self::Cmo => "👔",
            Self::Ceo => "🕴️",
            Self::Default => "🤖",
        }
    }
}

/// One transcript entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RenderedMessage {
    pub speaker: String,
    pub tag: SpeakerTag,
    pub avatar: String,
    pub content: String,
}

/// Render a transcript in order. Total and side-effect free.
pub fn render(transcript: &[DialogueTurn]) -> Vec<RenderedMessage> {
    transcript.iter().map(render_turn).collect()
}

fn render_turn(turn: &DialogueTurn) -> RenderedMessage {
    let tag = SpeakerTag::for_speaker(turn.speaker());
    let speaker = if turn.speaker().is_empty() {
        UNKNOWN_SPEAKER
    } else {
        turn.speaker()
    };
    RenderedMessage {
        speaker: speaker.to_string(),
        tag,
        avatar: tag.avatar().to_string(),
        content: turn.content().to_string(),
    }
}
