//! Per-model price table used to estimate the cost of a call.

use boardroom_core::TokenUsage;

/// Price in US dollars per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

const PRICE_TABLE: &[(&str, ModelPricing)] = &[
    ("gpt-4o-mini", ModelPricing { input_per_million: 0.15, output_per_million: 0.60 }),
    ("gpt-4o", ModelPricing { input_per_million: 2.50, output_per_million: 10.00 }),
    ("gpt-4.1-nano", ModelPricing { input_per_million: 0.10, output_per_million: 0.40 }),
    ("gpt-4.1-mini", ModelPricing { input_per_million: 0.40, output_per_million: 1.60 }),
    ("gpt-4.1", ModelPricing { input_per_million: 2.00, output_per_million: 8.00 }),
    ("o3-mini", ModelPricing { input_per_million: 1.10, output_per_million: 4.40 }),
    ("gpt-3.5-turbo", ModelPricing { input_per_million: 0.50, output_per_million: 1.50 }),
];

/// Look up pricing for a model.
///
/// Dated snapshots such as `gpt-4o-mini-2024-07-18` resolve to the longest
/// matching family prefix.
pub fn pricing_for(model: &str) -> Option<ModelPricing> {
    PRICE_TABLE
        .iter()
        .filter(|(family, _)| model == *family || model.starts_with(&format!("{}-", family)))
        .max_by_key(|(family, _)| family.len())
        .map(|(_, pricing)| *pricing)
}

/// Estimated cost of one call. Unknown models and missing usage cost nothing.
pub fn estimate_cost(model: &str, usage: Option<&TokenUsage>) -> f64 {
    match (pricing_for(model), usage) {
        (Some(pricing), Some(usage)) => {
            (usage.prompt_tokens as f64 * pricing.input_per_million
                + usage.completion_tokens as f64 * pricing.output_per_million)
                / 1_000_000.0
        }
        _ => 0.0,
    }
}
