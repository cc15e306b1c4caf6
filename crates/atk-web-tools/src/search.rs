//! Web search tool
//!
//! Queries DuckDuckGo's HTML endpoint and parses results with CSS
//! selectors. Results are normalized into [`SearchResult`] and cached by
//! query.

use crate::cache::ToolCache;
use crate::types::SearchResult;
use atk_core::{Error, Result};
use atk_tool::{ToolSpec, generate_schema, parse_params};
use async_trait::async_trait;
use schemars::JsonSchema;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchInput {
    /// Search query
    pub query: String,
    /// Maximum number of results to return
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    12
}

/// Pluggable search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// DuckDuckGo HTML search (no API key required)
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: SEARCH_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        tracing::debug!(query = %query, "running web search");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| Error::message(format!("search request failed: {}", e)))?;
        let html = response
            .text()
            .await
            .map_err(|e| Error::message(format!("search response unreadable: {}", e)))?;
        Ok(parse_results(&html, max_results))
    }
}

fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse("div.result").unwrap();
    let title_selector = Selector::parse("a.result__a").unwrap();
    let snippet_selector = Selector::parse(".result__snippet").unwrap();

    let mut results = Vec::new();
    for element in document.select(&result_selector) {
        let Some(anchor) = element.select(&title_selector).next() else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        let url = resolve_redirect(anchor.value().attr("href").unwrap_or_default());
        if url.is_empty() {
            continue;
        }
        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            snippet,
        });
        if results.len() >= max_results {
            break;
        }
    }
    results
}

/// DuckDuckGo result links point at a redirect endpoint carrying the real
/// target in the `uddg` query parameter.
fn resolve_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    match url::Url::parse(&absolute) {
        Ok(parsed) if parsed.path().starts_with("/l/") => parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
            .unwrap_or(absolute),
        Ok(_) => absolute,
        Err(_) => String::new(),
    }
}

/// Search with caching; composition tools call this directly
pub async fn web_search(
    provider: &dyn SearchProvider,
    cache: &ToolCache,
    input: &WebSearchInput,
) -> Result<Vec<SearchResult>> {
    let key = format!("web_search:{}:{}", input.query, input.max_results);
    if let Some(hit) = cache.get(&key) {
        if let Ok(results) = serde_json::from_value::<Vec<SearchResult>>(hit) {
            tracing::debug!(query = %input.query, "web search served from cache");
            return Ok(results);
        }
    }

    let results = provider.search(&input.query, input.max_results).await?;
    cache.put(key, serde_json::to_value(&results)?);
    Ok(results)
}

pub fn create_web_search_tool(
    provider: Arc<dyn SearchProvider>,
    cache: Arc<ToolCache>,
) -> Result<ToolSpec> {
    ToolSpec::builder()
        .name("web_search")
        .description("Web search using DuckDuckGo. Returns a list of normalized search results.")
        .input_schema(generate_schema::<WebSearchInput>())
        .tag("search")
        .execute(move |_ctx, params| {
            let provider = provider.clone();
            let cache = cache.clone();
            async move {
                let input: WebSearchInput = parse_params("web_search", params)?;
                let results = web_search(provider.as_ref(), &cache, &input).await?;
                Ok(serde_json::to_value(results)?)
            }
        })
        .build()
}
