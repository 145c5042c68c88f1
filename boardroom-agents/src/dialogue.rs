//! Bounded two-party dialogue engine.
//!
//! The initiator's opening message is turn 1. The parties then alternate,
//! each seeing the whole transcript from its own side, until the turn cap is
//! reached or a participant emits the termination keyword. One extra call
//! asks the initiator for a reflective summary. Any failure discards the run.

use boardroom_core::{
    AgentDescriptor, BoardroomResult, ChatMessage, ChatRequest, DialogueResult, DialogueTurn,
    TerminationReason, UsageReport, ValidationError,
};
use boardroom_llm::{estimate_cost, ChatProvider};
use std::sync::Arc;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Message that ends a dialogue early when a participant sends exactly it.
pub const DEFAULT_TERMINATION_KEYWORD: &str = "TERMINATE";

/// Request sent to the initiator once the exchange is over.
pub const DEFAULT_SUMMARY_PROMPT: &str =
    "Summarize the takeaway from the conversation. Do not add any introductory phrases.";

// ============================================================================
// STATE MACHINE
// ============================================================================

/// Where a running dialogue stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingInitiatorTurn,
    AwaitingResponderTurn,
    Terminated(TerminationReason),
}

impl DialogueState {
    /// State after the expected party has spoken, ignoring termination.
    pub fn advance(self) -> Self {
        match self {
            Self::AwaitingInitiatorTurn => Self::AwaitingResponderTurn,
            Self::AwaitingResponderTurn => Self::AwaitingInitiatorTurn,
            terminated => terminated,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}

/// How a participant can end the dialogue before the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Stop once a message, trimmed, is exactly this keyword.
    Keyword(String),
    /// Only the turn cap ends the dialogue.
    Disabled,
}

impl TerminationPolicy {
    pub fn is_termination(&self, message: &str) -> bool {
        match self {
            Self::Keyword(keyword) => !keyword.is_empty() && message.trim() == keyword,
            Self::Disabled => false,
        }
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self::Keyword(DEFAULT_TERMINATION_KEYWORD.to_string())
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Runs bounded dialogues against one chat provider.
#[derive(Clone)]
pub struct DialogueEngine {
    provider: Arc<dyn ChatProvider>,
    termination: TerminationPolicy,
    summary_prompt: String,
}

impl DialogueEngine {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            termination: TerminationPolicy::default(),
            summary_prompt: DEFAULT_SUMMARY_PROMPT.to_string(),
        }
    }

    pub fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_summary_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.summary_prompt = prompt.into();
        self
    }

    /// Run one dialogue of at most `max_turns` messages, the opening included.
    ///
    /// Makes at most `max_turns - 1` turn calls plus one summary call. All
    /// inputs are validated before the first call; on any collaborator failure
    /// the error is returned and the partial transcript is dropped.
    pub async fn run_dialogue(
        &self,
        initiator: &AgentDescriptor,
        responder: &AgentDescriptor,
        opening_message: &str,
        max_turns: u32,
    ) -> BoardroomResult<DialogueResult> {
        validate_participants(initiator, responder, opening_message, max_turns)?;

        let dialogue_id = Uuid::now_v7();
        let span = info_span!(
            "dialogue",
            %dialogue_id,
            initiator = %initiator.name(),
            responder = %responder.name(),
            max_turns,
            provider = self.provider.provider_id(),
        );

        async move {
            let mut usage = UsageReport::new();
            let mut transcript = vec![DialogueTurn::new(initiator.name(), opening_message)];
            let mut state = self.next_state(DialogueState::AwaitingResponderTurn, opening_message, 1, max_turns);

            let termination = loop {
                let speaker = match state {
                    DialogueState::AwaitingResponderTurn => responder,
                    DialogueState::AwaitingInitiatorTurn => initiator,
                    DialogueState::Terminated(reason) => break reason,
                };

                let request = ChatRequest::new(
                    speaker.name(),
                    speaker.directive(),
                    frame_history(speaker.name(), &transcript),
                );
                let reply = self.call(speaker, request, &mut usage).await?;
                tracing::debug!(
                    turn = transcript.len() + 1,
                    speaker = %speaker.name(),
                    chars = reply.len(),
                    "Turn completed"
                );

                let signalled_state = self.next_state(state.advance(), &reply, transcript.len() + 1, max_turns);
                transcript.push(DialogueTurn::new(speaker.name(), reply));
                state = signalled_state;
            };

            let mut messages = frame_history(initiator.name(), &transcript);
            messages.push(ChatMessage::user(self.summary_prompt.as_str()));
            let request = ChatRequest::new(initiator.name(), initiator.directive(), messages);
            let summary = self.call(initiator, request, &mut usage).await?;

            tracing::info!(
                turns = transcript.len(),
                ?termination,
                cost_usd = usage.total_cost_usd,
                "Dialogue finished"
            );
            Ok(DialogueResult::new(
                dialogue_id,
                transcript,
                summary,
                usage,
                termination,
            ))
        }
        .instrument(span)
        .await
    }

    /// State following a message that brought the transcript to `turns` entries.
    fn next_state(&self, pending: DialogueState, message: &str, turns: usize, max_turns: u32) -> DialogueState {
        if self.termination.is_termination(message) {
            DialogueState::Terminated(TerminationReason::TerminationSignal)
        } else if turns >= max_turns as usize {
            DialogueState::Terminated(TerminationReason::MaxTurnsReached)
        } else {
            pending
        }
    }

    async fn call(
        &self,
        speaker: &AgentDescriptor,
        request: ChatRequest,
        usage: &mut UsageReport,
    ) -> BoardroomResult<String> {
        let response = self.provider.complete(speaker.config(), request).await?;

        let cost = estimate_cost(&response.model, response.usage.as_ref());
        usage.record(&response.model, response.usage.as_ref(), cost);

        let normalized = response.reply.normalize();
        if normalized.content_missing {
            tracing::warn!(speaker = %speaker.name(), "Reply carried no textual content, using empty string");
        }
        if let Some(metadata) = normalized.metadata {
            usage.push_metadata(metadata);
        }
        Ok(normalized.text)
    }
}

impl std::fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("provider", &self.provider.provider_id())
            .field("termination", &self.termination)
            .field("summary_prompt", &self.summary_prompt)
            .finish()
    }
}

fn validate_participants(
    initiator: &AgentDescriptor,
    responder: &AgentDescriptor,
    opening_message: &str,
    max_turns: u32,
) -> BoardroomResult<()> {
    initiator.config().validate()?;
    responder.config().validate()?;

    if max_turns == 0 {
        return Err(ValidationError::InvalidValue {
            field: "max_turns".to_string(),
            reason: "must be at least 1".to_string(),
        }
        .into());
    }
    if initiator.name() == responder.name() {
        return Err(ValidationError::DuplicateParticipant {
            name: initiator.name().to_string(),
        }
        .into());
    }
    if opening_message.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "opening_message".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Present the transcript from `speaker`'s side: its own messages as
/// assistant turns, everything else as named user turns.
pub fn frame_history(speaker: &str, transcript: &[DialogueTurn]) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|turn| {
            if turn.speaker() == speaker {
                ChatMessage::assistant(turn.content())
            } else {
                ChatMessage::user(turn.content()).named(turn.speaker())
            }
        })
        .collect()
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use boardroom_core::{ModelConfig, Reply};
    use boardroom_llm::MockChatProvider;
    use proptest::prelude::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn pair(initiator: &str, responder: &str) -> (AgentDescriptor, AgentDescriptor) {
        let config = Arc::new(ModelConfig::new("gpt-4o-mini", "sk-test"));
        (
            AgentDescriptor::new(initiator, "first", Arc::clone(&config)).unwrap(),
            AgentDescriptor::new(responder, "second", config).unwrap(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: the turn cap bounds both the transcript and the calls made
        #[test]
        fn prop_turn_cap_bounds_transcript_and_calls(max_turns in 1u32..12) {
            let provider = Arc::new(MockChatProvider::new());
            let engine = DialogueEngine::new(provider.clone());
            let (a, b) = pair("CMO", "CEO");

            let result = block_on(engine.run_dialogue(&a, &b, "Focus on B2B", max_turns)).unwrap();

            prop_assert!(result.transcript().len() <= 2 * max_turns as usize);
            prop_assert!(provider.call_count() <= max_turns as usize + 1);
            prop_assert_eq!(result.transcript().len(), max_turns as usize);
        }

        /// Property: consecutive turns strictly alternate between the two names
        #[test]
        fn prop_speakers_alternate(
            names in ("[A-Za-z]{1,12}", "[A-Za-z]{1,12}").prop_filter("distinct", |(a, b)| a != b),
            max_turns in 1u32..10
        ) {
            let provider = Arc::new(MockChatProvider::new());
            let engine = DialogueEngine::new(provider);
            let (a, b) = pair(&names.0, &names.1);

            let result = block_on(engine.run_dialogue(&a, &b, "opening", max_turns)).unwrap();
            let transcript = result.transcript();

            prop_assert_eq!(transcript[0].speaker(), names.0.as_str());
            for window in transcript.windows(2) {
                prop_assert_ne!(window[0].speaker(), window[1].speaker());
            }
            for turn in transcript {
                prop_assert!(turn.speaker() == names.0 || turn.speaker() == names.1);
            }
        }

        /// Property: a failure on any turn call returns no result
        #[test]
        fn prop_failure_is_all_or_nothing(
            (max_turns, failing_call) in (1u32..10).prop_flat_map(|n| (Just(n), 1..=n as usize))
        ) {
            let provider = Arc::new(MockChatProvider::new().failing_on_call(failing_call));
            let engine = DialogueEngine::new(provider.clone());
            let (a, b) = pair("CMO", "CEO");

            let result = block_on(engine.run_dialogue(&a, &b, "Focus on B2B", max_turns));
            prop_assert!(result.is_err());
            prop_assert_eq!(provider.call_count(), failing_call);
        }

        /// Property: an early termination signal ends the run right after that turn
        #[test]
        fn prop_termination_signal_ends_run(
            (max_turns, signal_at) in (2u32..10).prop_flat_map(|n| (Just(n), 1..n as usize))
        ) {
            let mut replies: Vec<Reply> = (1..signal_at).map(|i| Reply::text(format!("turn {}", i))).collect();
            replies.push(Reply::text("TERMINATE"));
            replies.push(Reply::text("summary"));
            let provider = Arc::new(MockChatProvider::scripted(replies));
            let engine = DialogueEngine::new(provider.clone());
            let (a, b) = pair("CMO", "CEO");

            let result = block_on(engine.run_dialogue(&a, &b, "Focus on B2B", max_turns)).unwrap();
            prop_assert_eq!(result.transcript().len(), signal_at + 1);
            prop_assert_eq!(result.termination(), TerminationReason::TerminationSignal);
            prop_assert_eq!(result.summary(), "summary");
        }
    }
}
