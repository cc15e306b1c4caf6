use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One durable record of token usage and computed cost for a single
/// LLM-backed tool invocation. Serialized as a line of JSONL; never mutated
/// after it is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEvent {
    /// Invocation start time, epoch seconds
    pub ts: f64,
    pub tool: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub currency: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    #[serde(default)]
    pub meta: Value,
    /// Calendar date (YYYY-MM-DD) in UTC, derived from `ts` when unset
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
}

impl CostEvent {
    /// Fill in `date` from `ts` if it was not already set
    pub fn ensure_date(&mut self) {
        if self.date.is_empty() {
            self.date = date_string(self.ts);
        }
    }
}

/// UTC calendar date for an epoch-seconds timestamp
pub(crate) fn date_string(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
