//! Core types for ATK
//!
//! This crate provides the foundational pieces shared by the toolkit crates:
//! the error taxonomy, environment-driven configuration, the token-usage
//! meter, and the tool context trait.

pub mod config;
pub mod context;
pub mod error;
pub mod usage;

// Re-exports
pub use config::AtkConfig;
pub use context::ToolContext;
pub use error::{Error, Result};
pub use usage::{TokenUsage, UsageByModel, UsageMeter};
