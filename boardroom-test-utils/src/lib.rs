//! Boardroom Test Utilities
//!
//! Centralized test infrastructure for the Boardroom workspace:
//! - Proptest generators for names and transcripts
//! - Mock providers for testing
//! - Test fixtures for common scenarios
//! - Custom assertions for Boardroom-specific validation

// Re-export the mock provider from its source crate
pub use boardroom_llm::{ChatProvider, MockChatProvider};

// Re-export core types for convenience
pub use boardroom_core::{
    AgentDescriptor, BoardroomError, BoardroomResult, ChatMessage, ChatRequest, ChatRole,
    ConfigError, DialogueResult, DialogueTurn, LlmError, ModelConfig, Reply, TokenUsage,
    UsageReport, ValidationError,
};

use std::sync::Arc;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating Boardroom inputs.

    use super::*;
    use proptest::prelude::*;

    /// Generate a valid agent name.
    pub fn arb_agent_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_]{0,15}"
    }

    /// Generate two distinct agent names, initiator first.
    pub fn arb_distinct_names() -> impl Strategy<Value = (String, String)> {
        (arb_agent_name(), arb_agent_name()).prop_filter("names must differ", |(a, b)| a != b)
    }

    /// Generate any speaker name, including the empty string and the
    /// two names the renderer treats specially.
    pub fn arb_speaker_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("CMO".to_string()),
            Just("CEO".to_string()),
            Just(String::new()),
            ".{0,24}",
        ]
    }

    /// Generate a single turn with an arbitrary speaker.
    pub fn arb_turn() -> impl Strategy<Value = DialogueTurn> {
        (arb_speaker_name(), ".{0,200}")
            .prop_map(|(speaker, content)| DialogueTurn::new(speaker, content))
    }

    /// Generate a transcript of up to `max_len` turns.
    pub fn arb_transcript(max_len: usize) -> impl Strategy<Value = Vec<DialogueTurn>> {
        prop::collection::vec(arb_turn(), 0..=max_len)
    }

    /// Generate a non-blank message.
    pub fn arb_message() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ,.?!]{0,120}".prop_filter("not the stop keyword", |m| m.trim() != "TERMINATE")
    }

    /// Generate a turn cap within the API's default limit.
    pub fn arb_max_turns() -> impl Strategy<Value = u32> {
        1u32..=10
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;
    use boardroom_agents::personas;

    /// Credential used by every fixture.
    pub const TEST_API_KEY: &str = "sk-test-0000";

    /// Shared model configuration with a test credential.
    pub fn test_config() -> Arc<ModelConfig> {
        Arc::new(ModelConfig::with_default_model(TEST_API_KEY))
    }

    /// Model configuration whose credential is empty.
    pub fn keyless_config() -> Arc<ModelConfig> {
        Arc::new(ModelConfig::with_default_model(""))
    }

    pub fn strategist() -> AgentDescriptor {
        agent(personas::STRATEGIST_NAME, personas::STRATEGIST_DIRECTIVE)
    }

    pub fn cmo() -> AgentDescriptor {
        agent(personas::CMO_NAME, personas::CMO_DIRECTIVE)
    }

    pub fn ceo() -> AgentDescriptor {
        agent(personas::CEO_NAME, personas::CEO_DIRECTIVE)
    }

    /// Descriptor with the given name and directive on [`test_config`].
    pub fn agent(name: &str, directive: &str) -> AgentDescriptor {
        match AgentDescriptor::new(name, directive, test_config()) {
            Ok(descriptor) => descriptor,
            Err(e) => panic!("fixture agent {:?} is invalid: {}", name, e),
        }
    }

    /// Mock provider answering with the given texts in order.
    pub fn scripted_provider<I, S>(replies: I) -> Arc<MockChatProvider>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(MockChatProvider::scripted(
            replies.into_iter().map(|r| Reply::text(r)),
        ))
    }

    /// Echoing mock provider.
    pub fn echo_provider() -> Arc<MockChatProvider> {
        Arc::new(MockChatProvider::new())
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for Boardroom-specific validation.

    use super::*;

    /// Assert that a BoardroomResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &BoardroomResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a BoardroomResult is a Config error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &BoardroomResult<T>) {
        match result {
            Err(BoardroomError::Config(_)) => {}
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    /// Assert that a BoardroomResult is an Llm error.
    #[track_caller]
    pub fn assert_llm_error<T: std::fmt::Debug>(result: &BoardroomResult<T>) {
        match result {
            Err(BoardroomError::Llm(_)) => {}
            other => panic!("Expected Llm error, got: {:?}", other),
        }
    }

    /// Assert that a BoardroomResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &BoardroomResult<T>) {
        match result {
            Err(BoardroomError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that consecutive turns never share a speaker.
    #[track_caller]
    pub fn assert_alternating(transcript: &[DialogueTurn]) {
        for (i, pair) in transcript.windows(2).enumerate() {
            assert_ne!(
                pair[0].speaker(),
                pair[1].speaker(),
                "Turns {} and {} have the same speaker",
                i,
                i + 1
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixtures_are_valid() {
        assert!(fixtures::test_config().validate().is_ok());
        assert!(fixtures::keyless_config().validate().is_err());
        assert_eq!(fixtures::cmo().name(), "CMO");
        assert_eq!(fixtures::ceo().name(), "CEO");
        assert_eq!(fixtures::strategist().name(), "marketing_strategist");
    }

    #[test]
    fn test_assert_alternating_accepts_alternation() {
        assertions::assert_alternating(&[
            DialogueTurn::new("CMO", "a"),
            DialogueTurn::new("CEO", "b"),
            DialogueTurn::new("CMO", "c"),
        ]);
    }

    #[test]
    #[should_panic(expected = "same speaker")]
    fn test_assert_alternating_rejects_repeat() {
        assertions::assert_alternating(&[DialogueTurn::new("CMO", "a"), DialogueTurn::new("CMO", "b")]);
    }

    proptest! {
        #[test]
        fn test_distinct_names_generator(names in generators::arb_distinct_names()) {
            prop_assert_ne!(names.0, names.1);
        }

        #[test]
        fn test_transcript_generator_bounded(transcript in generators::arb_transcript(8)) {
            prop_assert!(transcript.len() <= 8);
        }
    }
}
