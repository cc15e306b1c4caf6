//! Tool system for ATK
//!
//! This crate provides the registry and invocation framework:
//! - `ToolSpec` and its builder
//! - JSON schema generation and parameter validation
//! - The insertion-ordered tool registry
//! - The execution engine with cost-accounting middleware
//! - The `Toolkit` facade tying registry and engine together

pub mod context;
pub mod engine;
pub mod registry;
pub mod schema;
pub mod spec;
pub mod toolkit;

// Re-exports
pub use context::DefaultToolContext;
pub use engine::ExecutionEngine;
pub use registry::{ToolRegistry, ToolSummary};
pub use schema::{ToolSchema, generate_schema, parse_params, validate_params};
pub use spec::{LLM_TAG, ToolImpl, ToolSpec, ToolSpecBuilder};
pub use toolkit::Toolkit;

// Re-export core types
pub use atk_core::{Error, Result, ToolContext, UsageMeter};
