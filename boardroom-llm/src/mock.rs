//! Mock chat provider for tests and offline runs.

use crate::ChatProvider;
use async_trait::async_trait;
use boardroom_core::{
    BoardroomError, BoardroomResult, ChatRequest, ChatResponse, LlmError, ModelConfig, Reply,
    TokenUsage,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

const MOCK_PROVIDER_ID: &str = "mock";
const EXCERPT_CHARS: usize = 80;

/// Deterministic [`ChatProvider`] that never touches the network.
///
/// Without a script it echoes the latest message back, attributed to the
/// answering agent. With a script it hands out the given replies in order and
/// fails with [`LlmError::ScriptExhausted`] once they run out. Every request
/// is recorded so tests can inspect what the caller sent.
#[derive(Debug, Default)]
pub struct MockChatProvider {
    script: Option<Mutex<VecDeque<Reply>>>,
    fail_on_call: Option<usize>,
    fixed_usage: Option<TokenUsage>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatProvider {
    /// Echoing provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider answering with `replies`, one per call.
    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Some(Mutex::new(replies.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Fail the `call`-th request (1-based) with an upstream error.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Report this usage for every call instead of the length-based estimate.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.fixed_usage = Some(usage);
        self
    }

    /// Number of `complete` calls received, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every request received, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }

    fn next_reply(&self, request: &ChatRequest) -> BoardroomResult<Reply> {
        match &self.script {
            Some(script) => lock(script).pop_front().ok_or_else(|| {
                BoardroomError::Llm(LlmError::ScriptExhausted {
                    provider: MOCK_PROVIDER_ID.to_string(),
                })
            }),
            None => Ok(Reply::text(echo(request))),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn echo(request: &ChatRequest) -> String {
    let last = request
        .messages
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or_default();
    let excerpt: String = last.chars().take(EXCERPT_CHARS).collect();
    format!("{}: responding to \"{}\"", request.agent, excerpt)
}

/// Roughly four characters per token.
fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

fn estimate_usage(request: &ChatRequest, reply: &Reply) -> TokenUsage {
    let prompt_tokens = estimate_tokens(&request.system)
        + request
            .messages
            .iter()
            .map(|m| estimate_tokens(&m.content))
            .sum::<u64>();
    let completion_tokens = match reply {
        Reply::Text { value } => estimate_tokens(value),
        Reply::Structured { content, .. } => {
            content.as_deref().map(estimate_tokens).unwrap_or_default()
        }
    };
    TokenUsage {
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens + completion_tokens,
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn provider_id(&self) -> &str {
        MOCK_PROVIDER_ID
    }

    async fn complete(
        &self,
        config: &ModelConfig,
        request: ChatRequest,
    ) -> BoardroomResult<ChatResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.requests).push(request.clone());

        if self.fail_on_call == Some(call) {
            return Err(BoardroomError::Llm(LlmError::RequestFailed {
                provider: MOCK_PROVIDER_ID.to_string(),
                status: 500,
                message: format!("injected failure on call {}", call),
            }));
        }

        let reply = self.next_reply(&request)?;
        let usage = self
            .fixed_usage
            .unwrap_or_else(|| estimate_usage(&request, &reply));

        Ok(ChatResponse {
            reply,
            usage: Some(usage),
            model: config.model().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::ChatMessage;

    fn config() -> ModelConfig {
        ModelConfig::new("gpt-4o-mini", "sk-test")
    }

    fn request(content: &str) -> ChatRequest {
        ChatRequest::new("CMO", "directive", vec![ChatMessage::user(content)])
    }

    #[tokio::test]
    async fn test_echo_names_agent_and_message() {
        let provider = MockChatProvider::new();
        let response = provider.complete(&config(), request("hello")).await.unwrap();
        assert_eq!(response.reply, Reply::text("CMO: responding to \"hello\""));
        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_echo_excerpt_is_char_safe() {
        let provider = MockChatProvider::new();
        let long = "é".repeat(200);
        let response = provider.complete(&config(), request(&long)).await.unwrap();
        let text = response.reply.normalize().text;
        assert_eq!(text.matches('é').count(), EXCERPT_CHARS);
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order_then_exhausts() {
        let provider = MockChatProvider::scripted([Reply::text("one"), Reply::text("two")]);
        let first = provider.complete(&config(), request("a")).await.unwrap();
        let second = provider.complete(&config(), request("b")).await.unwrap();
        assert_eq!(first.reply, Reply::text("one"));
        assert_eq!(second.reply, Reply::text("two"));

        let err = provider.complete(&config(), request("c")).await.unwrap_err();
        assert!(matches!(err, BoardroomError::Llm(LlmError::ScriptExhausted { .. })));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_injected_failure_hits_only_that_call() {
        let provider = MockChatProvider::new().failing_on_call(2);
        assert!(provider.complete(&config(), request("a")).await.is_ok());
        let err = provider.complete(&config(), request("b")).await.unwrap_err();
        assert!(matches!(
            err,
            BoardroomError::Llm(LlmError::RequestFailed { status: 500, .. })
        ));
        assert!(provider.complete(&config(), request("c")).await.is_ok());
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_usage_estimate_and_override() {
        let provider = MockChatProvider::scripted([Reply::text("abcd")]);
        let response = provider.complete(&config(), request("12345678")).await.unwrap();
        let usage = response.usage.unwrap();
        // "directive" is 9 chars -> 3 tokens, "12345678" -> 2 tokens
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 1);
        assert_eq!(usage.total_tokens, 6);

        let fixed = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        };
        let provider = MockChatProvider::new().with_usage(fixed);
        let response = provider.complete(&config(), request("x")).await.unwrap();
        assert_eq!(response.usage, Some(fixed));
    }
}
