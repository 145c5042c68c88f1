//! Chat completions over the OpenAI API

use super::client::OpenAIClient;
use super::types::{CompletionRequest, CompletionResponse, RequestMessage};
use super::{DEFAULT_BASE_URL, PROVIDER_ID};
use crate::ChatProvider;
use async_trait::async_trait;
use boardroom_core::{
    BoardroomResult, ChatMessage, ChatRequest, ChatResponse, ChatRole, ModelConfig, Reply,
    TokenUsage,
};
use serde_json::json;

/// [`ChatProvider`] backed by the OpenAI chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAiChatProvider {
    client: OpenAIClient,
    temperature: Option<f32>,
}

impl OpenAiChatProvider {
    pub fn new(base_url: impl Into<String>, requests_per_minute: u32) -> Self {
        Self {
            client: OpenAIClient::new(base_url, requests_per_minute),
            temperature: None,
        }
    }

    pub fn with_default_base_url() -> Self {
        Self::new(DEFAULT_BASE_URL, 60)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request(&self, config: &ModelConfig, request: &ChatRequest) -> CompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system.is_empty() {
            messages.push(RequestMessage {
                role: ChatRole::System.as_str().to_string(),
                name: None,
                content: request.system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(to_request_message));

        CompletionRequest {
            model: config.model().to_string(),
            messages,
            temperature: self.temperature,
        }
    }
}

fn to_request_message(message: &ChatMessage) -> RequestMessage {
    RequestMessage {
        role: message.role.as_str().to_string(),
        name: message.name.as_deref().and_then(sanitize_name),
        content: message.content.clone(),
    }
}

/// The API only accepts `[a-zA-Z0-9_-]{1,64}` as a participant name.
fn sanitize_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    async fn complete(
        &self,
        config: &ModelConfig,
        request: ChatRequest,
    ) -> BoardroomResult<ChatResponse> {
        let body = self.build_request(config, &request);
        tracing::debug!(
            request_id = %request.request_id,
            agent = %request.agent,
            model = %body.model,
            messages = body.messages.len(),
            "Sending chat completion"
        );

        let response: CompletionResponse = self
            .client
            .request(config.credential(), "chat/completions", &body)
            .await?;

        let model = response.model.clone().unwrap_or_else(|| body.model.clone());
        // An answer without choices is malformed but soft: it reads as empty content.
        let (content, finish_reason) = match response.choices.into_iter().next() {
            Some(choice) => (choice.message.content, choice.finish_reason),
            None => {
                tracing::warn!(request_id = %request.request_id, "Completion carried no choices");
                (None, None)
            }
        };

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatResponse {
            reply: Reply::Structured {
                content,
                metadata: json!({
                    "id": response.id,
                    "model": model,
                    "finish_reason": finish_reason,
                }),
            },
            usage,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use boardroom_core::{BoardroomError, LlmError};
    use serde_json::Value;

    async fn spawn_stub(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(_req): Json<Value>| {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn request() -> ChatRequest {
        ChatRequest::new(
            "CMO",
            "You are a CMO.",
            vec![ChatMessage::user("Let's talk").named("CEO")],
        )
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("CEO"), Some("CEO".to_string()));
        assert_eq!(sanitize_name("Chief Officer!"), Some("Chief_Officer_".to_string()));
        assert_eq!(sanitize_name(""), None);
        assert_eq!(sanitize_name(&"x".repeat(100)).map(|s| s.len()), Some(64));
    }

    #[test]
    fn test_build_request_puts_directive_first() {
        let provider = OpenAiChatProvider::with_default_base_url().with_temperature(0.2);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let body = provider.build_request(&config, &request());

        assert_eq!(body.model, "gpt-4o-mini");
        assert_eq!(body.temperature, Some(0.2));
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[0].content, "You are a CMO.");
        assert_eq!(body.messages[1].role, "user");
        assert_eq!(body.messages[1].name.as_deref(), Some("CEO"));
    }

    #[tokio::test]
    async fn test_complete_parses_choice_and_usage() {
        let base = spawn_stub(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Focus on B2B."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
            }),
        )
        .await;

        let provider = OpenAiChatProvider::new(base, 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let response = provider.complete(&config, request()).await.unwrap();

        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(16));
        let normalized = response.reply.normalize();
        assert_eq!(normalized.text, "Focus on B2B.");
        assert_eq!(
            normalized.metadata.and_then(|m| m.get("finish_reason").cloned()),
            Some(json!("stop"))
        );
    }

    #[tokio::test]
    async fn test_complete_null_content_is_missing_not_error() {
        let base = spawn_stub(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-2",
                "choices": [{"message": {"role": "assistant", "content": null}}]
            }),
        )
        .await;

        let provider = OpenAiChatProvider::new(base, 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let response = provider.complete(&config, request()).await.unwrap();

        assert_eq!(response.model, "gpt-4o-mini");
        assert!(response.usage.is_none());
        assert!(response.reply.normalize().content_missing);
    }

    #[tokio::test]
    async fn test_complete_maps_upstream_error_message() {
        let base = spawn_stub(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
        )
        .await;

        let provider = OpenAiChatProvider::new(base, 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-bad");
        let err = provider.complete(&config, request()).await.unwrap_err();

        match err {
            BoardroomError::Llm(LlmError::RequestFailed { status, message, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_maps_rate_limit() {
        let base = spawn_stub(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"message": "slow down"}}),
        )
        .await;

        let provider = OpenAiChatProvider::new(base, 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let err = provider.complete(&config, request()).await.unwrap_err();
        assert!(matches!(err, BoardroomError::Llm(LlmError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_complete_without_choices_reads_as_empty() {
        let base = spawn_stub(StatusCode::OK, json!({"id": "chatcmpl-3", "choices": []})).await;

        let provider = OpenAiChatProvider::new(base, 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let response = provider.complete(&config, request()).await.unwrap();
        let normalized = response.reply.normalize();
        assert_eq!(normalized.text, "");
        assert!(normalized.content_missing);
    }

    #[tokio::test]
    async fn test_complete_non_json_body_is_invalid_response() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { "definitely not json" }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let provider = OpenAiChatProvider::new(format!("http://{}/v1", addr), 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let err = provider.complete(&config, request()).await.unwrap_err();
        assert!(matches!(err, BoardroomError::Llm(LlmError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let provider = OpenAiChatProvider::new("http://127.0.0.1:1/v1", 6000);
        let config = ModelConfig::new("gpt-4o-mini", "sk-test");
        let err = provider.complete(&config, request()).await.unwrap_err();
        assert!(matches!(err, BoardroomError::Llm(LlmError::Transport { .. })));
    }
}
