//! Built-in web and documentation tools for ATK
//!
//! Web search, page fetching, and documentation discovery behind the
//! toolkit's uniform call contract. [`register_web_tools`] wires the whole
//! set into a [`Toolkit`]; the `_with` variant takes explicit search and
//! chat backends so tests can substitute mocks.

pub mod cache;
pub mod docs;
pub mod echo;
pub mod fetch;
pub mod search;
pub mod types;

// Re-exports
pub use cache::ToolCache;
pub use search::{DuckDuckGoProvider, SearchProvider};
pub use types::{RankedResult, SearchResult};

use atk_core::{AtkConfig, Error, Result};
use atk_model::{ChatApi, OpenAIClient};
use atk_tool::Toolkit;
use std::sync::Arc;
use std::time::Duration;

/// Register every built-in tool, wiring backends from the environment.
///
/// Without an `OPENAI_API_KEY` the LLM-backed tools still register; they
/// return a structured "no backend" result when invoked.
pub fn register_web_tools(toolkit: &mut Toolkit) -> Result<()> {
    let chat: Option<Arc<dyn ChatApi>> =
        OpenAIClient::from_env().map(|client| Arc::new(client) as Arc<dyn ChatApi>);
    let http = http_client(toolkit.config())?;
    let provider: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoProvider::new(http));
    register_web_tools_with(toolkit, provider, chat)
}

/// Register every built-in tool against explicit backends
pub fn register_web_tools_with(
    toolkit: &mut Toolkit,
    provider: Arc<dyn SearchProvider>,
    chat: Option<Arc<dyn ChatApi>>,
) -> Result<()> {
    let config = toolkit.config().clone();
    let http = http_client(&config)?;
    let cache = Arc::new(ToolCache::new(config.cache_enabled, config.cache_ttl_seconds));

    toolkit.register(search::create_web_search_tool(provider.clone(), cache.clone())?);
    toolkit.register(fetch::create_fetch_page_tool(http.clone())?);
    toolkit.register(docs::create_rank_docs_tool()?);
    toolkit.register(docs::create_validate_docs_tool()?);
    toolkit.register(docs::create_find_docs_tool(provider.clone(), cache.clone())?);
    toolkit.register(docs::create_find_docs_many_tool(provider.clone(), cache.clone())?);
    toolkit.register(docs::create_find_docs_validated_tool(provider, cache, http)?);
    toolkit.register(docs::create_rank_docs_llm_tool(chat.clone())?);
    toolkit.register(docs::create_validate_docs_llm_tool(chat)?);
    toolkit.register(echo::create_echo_tool()?);
    Ok(())
}

/// Shared HTTP client for outbound tool requests
pub fn http_client(config: &AtkConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("atk/0.1")
        .timeout(Duration::from_secs_f64(config.http_timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| Error::message(format!("failed to build HTTP client: {}", e)))
}
