//! Single-agent responder: one request, one reply.

use boardroom_core::{
    AgentDescriptor, BoardroomResult, ChatMessage, ChatRequest, UsageReport, ValidationError,
};
use boardroom_llm::{estimate_cost, ChatProvider};
use tracing::{info_span, Instrument};

/// Reply of a single agent together with what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub agent: String,
    pub content: String,
    pub usage: UsageReport,
}

/// Ask one agent one question and return its textual reply.
///
/// Fails with a configuration error before any network call when the agent's
/// credential is blank, and with a validation error when `request` is empty.
/// A reply without a textual field comes back as an empty string.
pub async fn respond(
    provider: &dyn ChatProvider,
    descriptor: &AgentDescriptor,
    request: &str,
) -> BoardroomResult<String> {
    respond_with_usage(provider, descriptor, request)
        .await
        .map(|reply| reply.content)
}

/// [`respond`], also returning the usage report for the call.
pub async fn respond_with_usage(
    provider: &dyn ChatProvider,
    descriptor: &AgentDescriptor,
    request: &str,
) -> BoardroomResult<AgentReply> {
    descriptor.config().validate()?;
    if request.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "request".to_string(),
        }
        .into());
    }

    let chat_request = ChatRequest::new(
        descriptor.name(),
        descriptor.directive(),
        vec![ChatMessage::user(request)],
    );
    let span = info_span!(
        "respond",
        agent = %descriptor.name(),
        request_id = %chat_request.request_id,
        provider = provider.provider_id(),
    );

    async move {
        let response = provider.complete(descriptor.config(), chat_request).await?;

        let mut usage = UsageReport::new();
        let cost = estimate_cost(&response.model, response.usage.as_ref());
        usage.record(&response.model, response.usage.as_ref(), cost);

        let normalized = response.reply.normalize();
        if normalized.content_missing {
            tracing::warn!("Reply carried no textual content, using empty string");
        }
        if let Some(metadata) = normalized.metadata {
            usage.push_metadata(metadata);
        }

        tracing::debug!(chars = normalized.text.len(), "Agent replied");
        Ok(AgentReply {
            agent: descriptor.name().to_string(),
            content: normalized.text,
            usage,
        })
    }
    .instrument(span)
    .await
}
