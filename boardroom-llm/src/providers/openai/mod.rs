//! OpenAI provider implementation
//!
//! Chat completions over the OpenAI HTTP API (or any compatible endpoint).

pub mod chat;
pub mod client;
pub mod types;

pub use chat::OpenAiChatProvider;
pub use client::OpenAIClient;

/// Provider identifier used in errors and logs.
pub const PROVIDER_ID: &str = "openai";

/// Public OpenAI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
