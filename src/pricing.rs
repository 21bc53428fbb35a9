//! Per-model token pricing for cost reporting.

use crate::provider::TokenUsage;

/// Price of one model in USD per million tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub model: &'static str,
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// Known model prices
pub const PRICING: &[ModelPrice] = &[
    ModelPrice {
        model: "gpt-4o-mini",
        input_per_million: 0.150,
        output_per_million: 0.600,
    },
    ModelPrice {
        model: "gpt-4o",
        input_per_million: 2.50,
        output_per_million: 10.00,
    },
    ModelPrice {
        model: "gpt-3.5-turbo",
        input_per_million: 0.50,
        output_per_million: 1.50,
    },
];

/// Find the price for `model`.
///
/// Dated snapshots such as `gpt-4o-mini-2024-07-18` resolve to the longest
/// matching base name.
pub fn price_for(model: &str) -> Option<&'static ModelPrice> {
    PRICING
        .iter()
        .filter(|p| model == p.model || model.starts_with(&format!("{}-", p.model)))
        .max_by_key(|p| p.model.len())
}

/// Cost in USD of `usage` on `model`. Unknown models cost nothing.
pub fn calculate_cost(model: &str, usage: &TokenUsage) -> f64 {
    match price_for(model) {
        Some(price) => {
            usage.input as f64 * price.input_per_million / 1_000_000.0
                + usage.output as f64 * price.output_per_million / 1_000_000.0
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage { input, output }
    }

    #[test]
    fn test_cost_for_known_model() {
        let cost = calculate_cost("gpt-4o-mini", &usage(1_000_000, 1_000_000));
        assert!((cost - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_model_is_free() {
        assert_eq!(calculate_cost("mock", &usage(500, 500)), 0.0);
        assert_eq!(calculate_cost("gpt-4omni", &usage(500, 500)), 0.0);
    }

    #[test]
    fn test_dated_snapshot_uses_longest_base() {
        assert_eq!(price_for("gpt-4o-mini-2024-07-18").unwrap().model, "gpt-4o-mini");
        assert_eq!(price_for("gpt-4o-2024-08-06").unwrap().model, "gpt-4o");
    }
}
