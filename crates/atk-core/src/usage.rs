//! Token-usage metering for LLM-backed tools
//!
//! A [`UsageMeter`] accumulates per-model token counts during a capture
//! window. The execution engine creates one meter per invocation and hands it
//! to the tool through its context, so concurrently running invocations each
//! observe only the tokens attributed to calls they made themselves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Token counts for one model within a capture scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Accumulated usage keyed by model identifier
pub type UsageByModel = HashMap<String, TokenUsage>;

/// Scoped accumulator of model token counts.
///
/// Scopes nest: `start_capture` saves whatever scope was active and opens a
/// fresh one; `stop_capture` returns the accumulated counts and restores the
/// saved scope. Recording with no active scope drops the counts silently. A
/// scope that never sees `stop_capture` (an inner capture abandoned by an
/// error) stays on the meter; the meter does not clean up behind callers.
#[derive(Debug, Clone, Default)]
pub struct UsageMeter {
    scopes: Arc<Mutex<Vec<UsageByModel>>>,
}

impl UsageMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty capture scope
    pub fn start_capture(&self) {
        self.scopes.lock().unwrap().push(UsageByModel::new());
    }

    /// Close the innermost scope and return its accumulated counts.
    ///
    /// Returns an empty map when no scope is active.
    pub fn stop_capture(&self) -> UsageByModel {
        self.scopes.lock().unwrap().pop().unwrap_or_default()
    }

    /// Add token counts for `model` into the active scope.
    ///
    /// With no capture running the counts are simply not accounted for.
    pub fn record(&self, model: &str, input_tokens: u64, output_tokens: u64) {
        let mut scopes = self.scopes.lock().unwrap();
        if let Some(scope) = scopes.last_mut() {
            let entry = scope.entry(model.to_string()).or_default();
            entry.input_tokens += input_tokens;
            entry.output_tokens += output_tokens;
        }
    }

    /// Number of open capture scopes
    pub fn depth(&self) -> usize {
        self.scopes.lock().unwrap().len()
    }
}
