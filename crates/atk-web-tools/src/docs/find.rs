//! Documentation discovery by composing search, ranking, fetch, and
//! validation
//!
//! Composition calls the underlying functions directly instead of
//! re-entering the registry; each registered tool stays a thin wrapper.

use crate::cache::ToolCache;
use crate::docs::rank::{RankDocsInput, rank_docs};
use crate::docs::validate::{ValidateDocsInput, validate_docs_page};
use crate::fetch::{FetchPageInput, fetch_page};
use crate::search::{SearchProvider, WebSearchInput, web_search};
use atk_core::Result;
use atk_tool::{ToolSpec, generate_schema, parse_params};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindDocsInput {
    /// Technology name
    pub technology: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindDocsOutput {
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindDocsManyInput {
    /// List of technology names
    pub technologies: Vec<String>,
}

/// Return the top documentation URL for a technology.
///
/// Strategy: run a few short queries, merge results, rank heuristically.
pub async fn find_docs(
    provider: &dyn SearchProvider,
    cache: &ToolCache,
    input: &FindDocsInput,
) -> Result<FindDocsOutput> {
    let queries = [
        format!("{} official documentation", input.technology),
        format!("{} docs", input.technology),
        format!("{} api reference", input.technology),
    ];

    let mut candidates = Vec::new();
    for query in queries {
        let results = web_search(
            provider,
            cache,
            &WebSearchInput {
                query,
                max_results: 10,
            },
        )
        .await?;
        candidates.extend(results);
    }

    let ranked = rank_docs(&RankDocsInput {
        technology: input.technology.clone(),
        candidates,
    });

    Ok(match ranked.into_iter().next() {
        Some(top) => FindDocsOutput {
            url: Some(top.result.url),
            title: Some(top.result.title),
            reason: Some("ranked_top".to_string()),
        },
        None => FindDocsOutput {
            url: None,
            title: None,
            reason: Some("no_results".to_string()),
        },
    })
}

/// Find docs and confirm the top candidate by fetching it and checking for
/// documentation signals; falls back to the unvalidated answer
pub async fn find_docs_validated(
    provider: &dyn SearchProvider,
    cache: &ToolCache,
    client: &reqwest::Client,
    input: &FindDocsInput,
) -> Result<FindDocsOutput> {
    let base = find_docs(provider, cache, input).await?;

    if let Some(url) = &base.url {
        let page = fetch_page(client, &FetchPageInput { url: url.clone() }).await;
        if page.content.as_deref().is_some_and(|c| !c.is_empty()) {
            let verdict = validate_docs_page(&ValidateDocsInput {
                url: page.url.clone(),
                content: page.content,
            });
            if verdict.is_docs {
                return Ok(FindDocsOutput {
                    url: Some(page.url),
                    title: base.title.clone(),
                    reason: Some("validated".to_string()),
                });
            }
        }
    }

    Ok(base)
}

pub fn create_find_docs_tool(
    provider: Arc<dyn SearchProvider>,
    cache: Arc<ToolCache>,
) -> Result<ToolSpec> {
    ToolSpec::builder()
        .name("find_docs")
        .description(
            "Find the official documentation URL for a technology by composing search + ranking.",
        )
        .input_schema(generate_schema::<FindDocsInput>())
        .output_schema(generate_schema::<FindDocsOutput>())
        .tag("docs")
        .execute(move |_ctx, params| {
            let provider = provider.clone();
            let cache = cache.clone();
            async move {
                let input: FindDocsInput = parse_params("find_docs", params)?;
                let output = find_docs(provider.as_ref(), &cache, &input).await?;
                Ok(serde_json::to_value(output)?)
            }
        })
        .build()
}

pub fn create_find_docs_many_tool(
    provider: Arc<dyn SearchProvider>,
    cache: Arc<ToolCache>,
) -> Result<ToolSpec> {
    ToolSpec::builder()
        .name("find_docs_many")
        .description("Find documentation URLs for many technologies (batched).")
        .input_schema(generate_schema::<FindDocsManyInput>())
        .tag("docs")
        .tag("batch")
        .execute(move |_ctx, params| {
            let provider = provider.clone();
            let cache = cache.clone();
            async move {
                let input: FindDocsManyInput = parse_params("find_docs_many", params)?;
                let mut outputs = Vec::with_capacity(input.technologies.len());
                for technology in input.technologies {
                    let output =
                        find_docs(provider.as_ref(), &cache, &FindDocsInput { technology }).await?;
                    outputs.push(output);
                }
                Ok(serde_json::to_value(outputs)?)
            }
        })
        .build()
}

pub fn create_find_docs_validated_tool(
    provider: Arc<dyn SearchProvider>,
    cache: Arc<ToolCache>,
    client: reqwest::Client,
) -> Result<ToolSpec> {
    ToolSpec::builder()
        .name("find_docs_validated")
        .description(
            "Find docs and validate the top candidate by fetching content and checking docs signals.",
        )
        .input_schema(generate_schema::<FindDocsInput>())
        .output_schema(generate_schema::<FindDocsOutput>())
        .tag("docs")
        .tag("validation")
        .execute(move |_ctx, params| {
            let provider = provider.clone();
            let cache = cache.clone();
            let client = client.clone();
            async move {
                let input: FindDocsInput = parse_params("find_docs_validated", params)?;
                let output = find_docs_validated(provider.as_ref(), &cache, &client, &input).await?;
                Ok(serde_json::to_value(output)?)
            }
        })
        .build()
}
