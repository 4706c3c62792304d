use serde::{Deserialize, Serialize};

use crate::usage::TokenUsage;

/// Per-million-token prices in US dollars, fixed for the lifetime of a run.
/// Constructed once at startup and passed in explicitly; there is no ambient
/// or static pricing state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        // gpt-4-turbo list prices
        Self {
            input_per_million: 10.00,
            output_per_million: 30.00,
        }
    }
}

/// Estimated dollar cost of one completion call.
///
/// Token counts are unsigned, so negative usage is unrepresentable here;
/// missing usage is rejected before a `TokenUsage` is ever built.
pub fn estimate_cost(usage: TokenUsage, pricing: &PricingConfig) -> f64 {
    let input_cost = usage.prompt_tokens as f64 / 1_000_000.0 * pricing.input_per_million;
    let output_cost = usage.completion_tokens as f64 / 1_000_000.0 * pricing.output_per_million;
    input_cost + output_cost
}
