//! Per-model pricing lookup
//!
//! Prices in the bundled table are quoted **per 100 tokens** and divided by
//! 100 before being multiplied by token counts. Unknown models fall back to
//! known name fragments, then to the default model's pricing; estimation
//! never fails.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

const PRICING_JSON: &str = include_str!("../data/pricing.json");

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Fragments tried in order when no exact entry matches; more specific names
/// come first ("gpt-4o-mini" would otherwise be swallowed by "gpt-4o").
const FALLBACK_FRAGMENTS: &[&str] = &["gpt-4o-mini", "gpt-4.1-mini", "gpt-4o", "gpt-4.1"];

#[derive(Debug, Clone)]
struct ModelPrice {
    input_per_100: f64,
    output_per_100: f64,
    currency: String,
}

/// Computed cost for one model/token-count observation
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub currency: String,
}

#[derive(Deserialize)]
struct PricingFile {
    models: Vec<PricingEntry>,
}

#[derive(Deserialize)]
struct PricingEntry {
    provider: String,
    model: String,
    input_price_per_100_tokens: f64,
    output_price_per_100_tokens: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

static PRICING: Lazy<HashMap<String, ModelPrice>> = Lazy::new(|| {
    match serde_json::from_str::<PricingFile>(PRICING_JSON) {
        Ok(file) => file
            .models
            .into_iter()
            .filter(|entry| entry.provider == "OpenAI")
            .map(|entry| {
                (
                    entry.model,
                    ModelPrice {
                        input_per_100: entry.input_price_per_100_tokens,
                        output_per_100: entry.output_price_per_100_tokens,
                        currency: entry.currency,
                    },
                )
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "bundled pricing table failed to parse, using built-in prices");
            builtin_pricing()
        }
    }
});

fn builtin_pricing() -> HashMap<String, ModelPrice> {
    HashMap::from([
        (
            "gpt-4o-mini".to_string(),
            ModelPrice {
                input_per_100: 0.000015,
                output_per_100: 0.00006,
                currency: "USD".to_string(),
            },
        ),
        (
            "gpt-4o".to_string(),
            ModelPrice {
                input_per_100: 0.0005,
                output_per_100: 0.0015,
                currency: "USD".to_string(),
            },
        ),
    ])
}

fn lookup(model: &str) -> ModelPrice {
    if let Some(price) = PRICING.get(model) {
        return price.clone();
    }
    for fragment in FALLBACK_FRAGMENTS {
        if model.contains(fragment) {
            if let Some(price) = PRICING.get(*fragment) {
                return price.clone();
            }
        }
    }
    PRICING
        .get(DEFAULT_MODEL)
        .cloned()
        .unwrap_or_else(|| ModelPrice {
            input_per_100: 0.000015,
            output_per_100: 0.00006,
            currency: "USD".to_string(),
        })
}

/// Estimate the cost of one observation for `model`.
///
/// Table prices are per 100 tokens; scale down before multiplying.
pub fn estimate_cost(model: &str, input_tokens: u64, output_tokens: u64) -> CostBreakdown {
    let price = lookup(model);
    let input_cost = input_tokens as f64 * (price.input_per_100 / 100.0);
    let output_cost = output_tokens as f64 * (price.output_per_100 / 100.0);
    CostBreakdown {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
        currency: price.currency,
    }
}
