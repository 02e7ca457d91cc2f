//! Token usage and cost logging.
//!
//! A fire-and-forget sink: nothing reads the result back.

use crate::client::LlmUsage;

/// USD per 1K tokens for models with a known price.
const MODEL_COSTS: &[(&str, f64)] = &[
    ("gpt-4.1-nano", 0.0025),
    ("gpt-3.5", 0.0015),
    ("gpt-4", 0.03),
];

/// Price applied to models missing from the table.
const DEFAULT_COST_PER_1K: f64 = 0.0025;

/// Estimated USD cost of `tokens` tokens on `model`.
///
/// Entries are matched by prefix, so "gpt-4o-mini" prices as "gpt-4".
pub fn estimate_cost(model: &str, tokens: u32) -> f64 {
    let per_1k = MODEL_COSTS
        .iter()
        .find(|(name, _)| model.starts_with(name))
        .map(|(_, cost)| *cost)
        .unwrap_or(DEFAULT_COST_PER_1K);

    let cost = (f64::from(tokens) / 1000.0) * per_1k;
    (cost * 1_000_000.0).round() / 1_000_000.0
}

/// Emit a `token_usage` event for one completion.
pub fn log_token_usage(model: &str, usage: &LlmUsage) {
    let cost = estimate_cost(model, usage.total_tokens);
    tracing::info!(
        target: "token_usage",
        model,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        cost_usd = cost,
        "Completion token usage"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_cost() {
        assert!((estimate_cost("gpt-4.1-nano", 1000) - 0.0025).abs() < 1e-9);
        assert!((estimate_cost("gpt-4", 300) - 0.009).abs() < 1e-9);
    }

    #[test]
    fn test_prefix_ordering_prefers_specific_entry() {
        // "gpt-4.1-nano" also starts with "gpt-4"; the more specific entry is listed first.
        assert!((estimate_cost("gpt-4.1-nano", 2000) - 0.005).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_model_uses_default() {
        assert!((estimate_cost("llama3.2", 300) - 0.00075).abs() < 1e-9);
    }

    #[test]
    fn test_log_token_usage_does_not_panic() {
        log_token_usage("llama3.2", &LlmUsage::new(10, 5));
    }
}
