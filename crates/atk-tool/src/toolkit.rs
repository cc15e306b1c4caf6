//! Toolkit facade
//!
//! Owns the registry and the execution engine so callers get the whole
//! invocation surface from one object. Tests construct isolated toolkits
//! instead of sharing process-global state.

use crate::engine::ExecutionEngine;
use crate::registry::{ToolRegistry, ToolSummary};
use crate::spec::ToolSpec;
use atk_core::{AtkConfig, Result};
use atk_cost::CostLogger;
use serde_json::Value;
use std::sync::Arc;

pub struct Toolkit {
    registry: ToolRegistry,
    engine: ExecutionEngine,
    config: AtkConfig,
}

impl Toolkit {
    /// Toolkit configured from environment variables
    pub fn new() -> Self {
        Self::with_config(AtkConfig::from_env())
    }

    pub fn with_config(config: AtkConfig) -> Self {
        let engine = ExecutionEngine::new(CostLogger::new(&config));
        Self {
            registry: ToolRegistry::new(),
            engine,
            config,
        }
    }

    /// Toolkit with an explicitly wired cost logger (tests, CLI)
    pub fn with_logger(config: AtkConfig, logger: CostLogger) -> Self {
        Self {
            registry: ToolRegistry::new(),
            engine: ExecutionEngine::new(logger),
            config,
        }
    }

    pub fn config(&self) -> &AtkConfig {
        &self.config
    }

    pub fn register(&mut self, spec: ToolSpec) {
        self.registry.register(spec);
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke a registered tool by name
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let spec = self.registry.get(name)?;
        self.engine.execute(spec, params).await
    }

    /// Blocking counterpart of [`invoke`](Self::invoke); for plain-thread
    /// callers only
    pub fn invoke_blocking(&self, name: &str, params: Value) -> Result<Value> {
        let spec = self.registry.get(name)?;
        self.engine.execute_blocking(spec, params)
    }

    pub fn list(&self) -> &[Arc<ToolSpec>] {
        self.registry.list()
    }

    pub fn summaries(&self) -> Vec<ToolSummary> {
        self.registry.summaries()
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ToolSchema;
    use atk_core::Error;
    use serde_json::json;

    fn test_toolkit() -> (Toolkit, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let logger = CostLogger::with_paths(
            true,
            dir.path().join("cost_logs.jsonl"),
            dir.path().join("daily"),
        );
        (Toolkit::with_logger(AtkConfig::default(), logger), dir)
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let (toolkit, _dir) = test_toolkit();
        let err = toolkit.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_invoke_registered_tool() {
        let (mut toolkit, _dir) = test_toolkit();
        toolkit.register(
            ToolSpec::builder()
                .name("echo")
                .description("Returns its input text unchanged")
                .input_schema(
                    ToolSchema::new()
                        .property("text", "string", "Text to echo")
                        .required("text")
                        .build(),
                )
                .execute_sync(|_ctx, params| Ok(params["text"].clone()))
                .build()
                .unwrap(),
        );

        let result = toolkit.invoke("echo", json!({"text": "hi"})).await.unwrap();
        assert_eq!(result, json!("hi"));

        let err = toolkit.invoke("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }
}
