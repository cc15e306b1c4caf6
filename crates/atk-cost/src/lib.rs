//! Cost accounting for LLM-backed tools
//!
//! Token usage observed by the execution engine is priced against a bundled
//! per-model table and appended as one JSON line per invocation to an
//! append-only audit trail, with basic aggregate queries over the trailing
//! days of logs.

mod event;
mod logger;
mod pricing;

pub use event::CostEvent;
pub use logger::{CostLogger, ModelBreakdown, ToolUsageStats};
pub use pricing::{CostBreakdown, estimate_cost};
