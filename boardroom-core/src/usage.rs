//! Usage and cost accounting for one interaction.

use crate::TokenUsage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated usage for a single model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModelUsage {
    pub requests: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Estimated cost in US dollars.
    pub cost_usd: f64,
}

/// Usage report attached to a dialogue result.
///
/// Keyed by the model that served each call. `metadata` carries whatever
/// extra per-call fields the collaborator returned, untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsageReport {
    pub models: BTreeMap<String, ModelUsage>,
    pub total_cost_usd: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub metadata: Vec<serde_json::Value>,
}

impl UsageReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one collaborator call.
    pub fn record(&mut self, model: &str, usage: Option<&TokenUsage>, cost_usd: f64) {
        let entry = self.models.entry(model.to_string()).or_default();
        entry.requests += 1;
        if let Some(usage) = usage {
            entry.prompt_tokens += usage.prompt_tokens;
            entry.completion_tokens += usage.completion_tokens;
            entry.total_tokens += usage.total_tokens;
        }
        entry.cost_usd += cost_usd;
        self.total_cost_usd += cost_usd;
    }

    pub fn push_metadata(&mut self, metadata: serde_json::Value) {
        self.metadata.push(metadata);
    }

    pub fn total_requests(&self) -> u64 {
        self.models.values().map(|m| m.requests).sum()
    }

    pub fn total_tokens(&self) -> u64 {
        self.models.values().map(|m| m.total_tokens).sum()
    }
}
