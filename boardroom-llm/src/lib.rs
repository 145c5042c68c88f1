//! Boardroom LLM - Collaborator Boundary
//!
//! Provider-agnostic trait for chat completions, the OpenAI implementation,
//! a deterministic mock and the per-process cost tracker. Everything that
//! talks to a language model goes through [`ChatProvider`].

use async_trait::async_trait;
use boardroom_core::{BoardroomResult, ChatRequest, ChatResponse, ModelConfig, UsageReport};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod mock;
pub mod pricing;
pub mod providers;

pub use mock::MockChatProvider;
pub use pricing::{estimate_cost, pricing_for, ModelPricing};
pub use providers::{OpenAIClient, OpenAiChatProvider};

// ============================================================================
// CHAT PROVIDER TRAIT
// ============================================================================

/// Trait for chat-completion providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// The credential travels with `config` on every call, so one provider can
/// serve agents configured with different keys.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short identifier used in logs and errors.
    fn provider_id(&self) -> &str;

    /// Perform one request/response cycle.
    ///
    /// # Returns
    /// * `Ok(ChatResponse)` - The reply, usage and serving model
    /// * `Err(BoardroomError::Llm)` - If the collaborator fails or cannot be reached
    async fn complete(
        &self,
        config: &ModelConfig,
        request: ChatRequest,
    ) -> BoardroomResult<ChatResponse>;
}

// ============================================================================
// COST TRACKER
// ============================================================================

/// Cumulative token usage and estimated cost across every interaction the
/// process has served. Thread-safe via atomic operations.
pub struct CostTracker {
    interactions: AtomicU64,
    requests: AtomicU64,
    prompt_tokens: AtomicU64,
    completion_tokens: AtomicU64,
    /// Estimated cost in millionths of a dollar.
    cost_micros: AtomicU64,
}

/// Point-in-time copy of a [`CostTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsageSnapshot {
    pub interactions: u64,
    pub requests: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
}

impl CostTracker {
    pub fn new() -> Self {
        Self {
            interactions: AtomicU64::new(0),
            requests: AtomicU64::new(0),
            prompt_tokens: AtomicU64::new(0),
            completion_tokens: AtomicU64::new(0),
            cost_micros: AtomicU64::new(0),
        }
    }

    /// Fold the usage of one finished interaction into the totals.
    pub fn record_report(&self, report: &UsageReport) {
        self.interactions.fetch_add(1, Ordering::Relaxed);
        for usage in report.models.values() {
            self.requests.fetch_add(usage.requests, Ordering::Relaxed);
            self.prompt_tokens
                .fetch_add(usage.prompt_tokens, Ordering::Relaxed);
            self.completion_tokens
                .fetch_add(usage.completion_tokens, Ordering::Relaxed);
        }
        let micros = (report.total_cost_usd.max(0.0) * 1_000_000.0).round() as u64;
        self.cost_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let prompt_tokens = self.prompt_tokens.load(Ordering::Relaxed);
        let completion_tokens = self.completion_tokens.load(Ordering::Relaxed);
        UsageSnapshot {
            interactions: self.interactions.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            total_cost_usd: self.cost_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.interactions.store(0, Ordering::Relaxed);
        self.requests.store(0, Ordering::Relaxed);
        self.prompt_tokens.store(0, Ordering::Relaxed);
        self.completion_tokens.store(0, Ordering::Relaxed);
        self.cost_micros.store(0, Ordering::Relaxed);
    }
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CostTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("CostTracker")
            .field("interactions", &snapshot.interactions)
            .field("requests", &snapshot.requests)
            .field("total_tokens", &snapshot.total_tokens)
            .field("total_cost_usd", &snapshot.total_cost_usd)
            .finish()
    }
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
    use boardroom_core::TokenUsage;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the tracker's totals equal the sum of the recorded reports
        #[test]
        fn prop_tracker_sums_reports(
            calls in prop::collection::vec((0u64..100_000, 0u64..100_000), 0..20)
        ) {
            let tracker = CostTracker::new();
            for (prompt, completion) in &calls {
                let mut report = UsageReport::new();
                report.record("gpt-4o", Some(&TokenUsage {
                    prompt_tokens: *prompt,
                    completion_tokens: *completion,
                    total_tokens: prompt + completion,
                }), 0.0);
                tracker.record_report(&report);
            }

            let snapshot = tracker.snapshot();
            prop_assert_eq!(snapshot.interactions, calls.len() as u64);
            prop_assert_eq!(snapshot.prompt_tokens, calls.iter().map(|c| c.0).sum::<u64>());
            prop_assert_eq!(snapshot.completion_tokens, calls.iter().map(|c| c.1).sum::<u64>());
        }

        /// Property: estimated cost is never negative and grows with usage
        #[test]
        fn prop_estimate_cost_monotonic(
            prompt in 0u64..10_000_000,
            completion in 0u64..10_000_000,
            extra in 1u64..1_000_000
        ) {
            let usage = TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt + completion,
            };
            let more = TokenUsage {
                prompt_tokens: prompt + extra,
                ..usage
            };
            let base = estimate_cost("gpt-4o-mini", Some(&usage));
            prop_assert!(base >= 0.0);
            prop_assert!(estimate_cost("gpt-4o-mini", Some(&more)) > base);
        }
    }
}
