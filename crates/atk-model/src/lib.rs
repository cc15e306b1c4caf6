//! Model clients for ATK
//!
//! This crate provides the OpenAI-compatible chat completions client and the
//! metered wrapper LLM-backed tools use so their token usage lands in the
//! invocation's [`atk_core::UsageMeter`].

mod metered;
mod openai;
mod types;

pub use metered::{ChatApi, MeteredChat};
pub use openai::OpenAIClient;
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
