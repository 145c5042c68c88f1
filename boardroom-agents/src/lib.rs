//! Boardroom Agents
//!
//! The three pieces of actual logic: a single-agent responder, the bounded
//! two-party dialogue engine and the transcript renderer, plus the built-in
//! EdTech personas they are demonstrated with.

pub mod dialogue;
pub mod personas;
pub mod render;
pub mod responder;

pub use dialogue::{
    frame_history, DialogueEngine, DialogueState, TerminationPolicy, DEFAULT_SUMMARY_PROMPT,
    DEFAULT_TERMINATION_KEYWORD,
};
pub use render::{render, RenderedMessage, SpeakerTag};
pub use responder::{respond, respond_with_usage, AgentReply};
