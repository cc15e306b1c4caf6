//! atk — tool registry and invocation framework for LLM-driven agents
//!
//! Tools are schema-validated callables registered by name and invoked
//! through a uniform execution engine; tools tagged `"llm"` get token
//! metering and an append-only cost audit trail. This facade crate
//! re-exports the public API and wires the built-in tool set.

// Core registry and invocation surface
pub use atk_tool::{
    DefaultToolContext, ExecutionEngine, LLM_TAG, ToolRegistry, ToolSchema, ToolSpec,
    ToolSpecBuilder, ToolSummary, Toolkit, generate_schema, parse_params, validate_params,
};

// Foundation types
pub use atk_core::{AtkConfig, Error, Result, TokenUsage, ToolContext, UsageMeter};

// Cost accounting
pub use atk_cost::{CostBreakdown, CostEvent, CostLogger, ToolUsageStats, estimate_cost};

// Model clients
pub use atk_model::{ChatApi, ChatRequest, ChatResponse, MeteredChat, OpenAIClient};

// Built-in tools
pub use atk_web_tools::{
    DuckDuckGoProvider, SearchProvider, SearchResult, register_web_tools,
    register_web_tools_with,
};

/// Build a toolkit with every built-in tool registered, configured from the
/// environment
pub fn default_toolkit() -> Result<Toolkit> {
    let mut toolkit = Toolkit::new();
    register_web_tools(&mut toolkit)?;
    Ok(toolkit)
}

/// Quick way to get just the docs URL for a technology
pub async fn find_docs_url(toolkit: &Toolkit, technology: &str) -> Result<Option<String>> {
    let result = toolkit
        .invoke("find_docs", serde_json::json!({"technology": technology}))
        .await?;
    Ok(result["url"].as_str().map(String::from))
}
