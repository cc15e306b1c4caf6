use super::UsageMeter;

/// Context provided to a tool implementation for one invocation
pub trait ToolContext: Send + Sync {
    /// Unique ID for this invocation
    fn invocation_id(&self) -> &str;

    /// The invocation's token-usage meter. LLM-backed tools route their
    /// completion calls through a metered client bound to this meter.
    fn usage_meter(&self) -> &UsageMeter;
}
