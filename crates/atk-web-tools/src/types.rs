use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized result from a search provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// A search result with its heuristic documentation score
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RankedResult {
    pub result: SearchResult,
    pub score: f64,
}
