use atk_core::{Error, Result, ToolContext};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Tag that routes an invocation through cost instrumentation
pub const LLM_TAG: &str = "llm";

/// Type alias for an asynchronous tool implementation
pub type AsyncToolFn = Box<
    dyn Fn(Arc<dyn ToolContext>, Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// Type alias for a synchronous (blocking) tool implementation
pub type SyncToolFn = Box<dyn Fn(Arc<dyn ToolContext>, Value) -> Result<Value> + Send + Sync>;

/// How a tool's implementation runs.
///
/// Synchronous implementations are offloaded to the blocking pool when
/// invoked from the async path; asynchronous implementations are awaited in
/// place.
pub enum ToolImpl {
    Sync(SyncToolFn),
    Async(AsyncToolFn),
}

/// Registered metadata + implementation bundle for one tool
pub struct ToolSpec {
    name: String,
    description: String,
    input_schema: Value,
    output_schema: Option<Value>,
    tags: Vec<String>,
    expected_tokens: Option<u32>,
    pub(crate) implementation: ToolImpl,
}

impl ToolSpec {
    pub fn builder() -> ToolSpecBuilder {
        ToolSpecBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Advisory result shape; never enforced at call time
    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Advisory token estimate hint from registration
    pub fn expected_tokens(&self) -> Option<u32> {
        self.expected_tokens
    }

    pub(crate) fn call_sync(&self, ctx: Arc<dyn ToolContext>, params: Value) -> Result<Value> {
        match &self.implementation {
            ToolImpl::Sync(f) => f(ctx, params),
            ToolImpl::Async(_) => Err(Error::message(format!(
                "tool '{}' is not synchronous",
                self.name
            ))),
        }
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("tags", &self.tags)
            .field("expected_tokens", &self.expected_tokens)
            .finish()
    }
}

/// Builder for ToolSpec
pub struct ToolSpecBuilder {
    name: Option<String>,
    description: Option<String>,
    input_schema: Option<Value>,
    output_schema: Option<Value>,
    tags: Vec<String>,
    expected_tokens: Option<u32>,
    implementation: Option<ToolImpl>,
}

impl ToolSpecBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            input_schema: None,
            output_schema: None,
            tags: Vec::new(),
            expected_tokens: None,
            implementation: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn expected_tokens(mut self, tokens: u32) -> Self {
        self.expected_tokens = Some(tokens);
        self
    }

    /// Set an asynchronous implementation
    pub fn execute<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Arc<dyn ToolContext>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.implementation = Some(ToolImpl::Async(Box::new(move |ctx, params| {
            Box::pin(f(ctx, params))
        })));
        self
    }

    /// Set a synchronous implementation; the engine offloads it to a worker
    /// thread on the async path
    pub fn execute_sync<F>(mut self, f: F) -> Self
    where
        F: Fn(Arc<dyn ToolContext>, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.implementation = Some(ToolImpl::Sync(Box::new(f)));
        self
    }

    pub fn build(self) -> Result<ToolSpec> {
        Ok(ToolSpec {
            name: self
                .name
                .ok_or_else(|| Error::message("Tool name is required"))?,
            description: self.description.unwrap_or_default(),
            input_schema: self
                .input_schema
                .ok_or_else(|| Error::message("Tool input schema is required"))?,
            output_schema: self.output_schema,
            tags: self.tags,
            expected_tokens: self.expected_tokens,
            implementation: self
                .implementation
                .ok_or_else(|| Error::message("Tool execute function is required"))?,
        })
    }
}

impl Default for ToolSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
