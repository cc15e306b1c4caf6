//! LLM-backed documentation tools
//!
//! Both tools carry the `"llm"` tag, so the engine wraps their invocations
//! in a capture window; completions go through [`MeteredChat`] bound to the
//! invocation's meter, which is where the token counts come from. Without a
//! configured backend they return a structured "no backend" result instead
//! of failing.

use crate::types::SearchResult;
use atk_model::{ChatApi, ChatRequest, MeteredChat};
use atk_tool::{LLM_TAG, ToolSpec, generate_schema, parse_params};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const NO_BACKEND_REASON: &str = "no_llm_backend";

/// Page text beyond this many characters is not sent to the model
const VALIDATE_CONTENT_LIMIT: usize = 8000;

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RankDocsLlmInput {
    /// Technology name
    pub technology: String,
    /// Candidate results to re-rank
    pub candidates: Vec<SearchResult>,
    /// LLM model to use
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RankDocsLlmOutput {
    pub url: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ValidateDocsLlmInput {
    /// Page URL
    pub url: String,
    /// Fetched page text content
    #[serde(default)]
    pub content: Option<String>,
    /// LLM model to use
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateDocsLlmOutput {
    pub url: String,
    pub is_docs: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

pub fn create_rank_docs_llm_tool(chat: Option<Arc<dyn ChatApi>>) -> atk_core::Result<ToolSpec> {
    ToolSpec::builder()
        .name("rank_docs_llm")
        .description("Use an LLM to pick the best official docs URL from candidates.")
        .input_schema(generate_schema::<RankDocsLlmInput>())
        .output_schema(generate_schema::<RankDocsLlmOutput>())
        .tag("docs")
        .tag(LLM_TAG)
        .tag("ranking")
        .expected_tokens(350)
        .execute(move |ctx, params| {
            let chat = chat.clone();
            async move {
                let input: RankDocsLlmInput = parse_params("rank_docs_llm", params)?;
                let Some(chat) = chat else {
                    return Ok(serde_json::to_value(RankDocsLlmOutput {
                        url: None,
                        reason: Some(NO_BACKEND_REASON.to_string()),
                    })?);
                };

                let mut lines = Vec::with_capacity(input.candidates.len());
                for (i, candidate) in input.candidates.iter().enumerate() {
                    lines.push(format!(
                        "{}. title={}\n   url={}\n   snippet={}",
                        i + 1,
                        candidate.title,
                        candidate.url,
                        candidate.snippet
                    ));
                }
                let prompt = format!(
                    "You are ranking web results to find the OFFICIAL documentation homepage for a technology.\n\
                     Technology: {}\n\
                     Choose ONE URL from the list that is most likely the official docs landing page.\n\
                     Prefer domains like docs.*, readthedocs, github.io, official site /docs, Docusaurus/MkDocs/Sphinx pages.\n\
                     Return ONLY the URL.\n\n{}",
                    input.technology,
                    lines.join("\n")
                );

                let metered = MeteredChat::new(chat, ctx.usage_meter().clone());
                let response = metered
                    .complete(
                        ChatRequest::new(&input.model)
                            .system("You return only the winning URL")
                            .user(prompt)
                            .temperature(0.0),
                    )
                    .await?;

                let content = response.text().unwrap_or_default().trim().to_string();
                let url = content
                    .split_whitespace()
                    .find(|token| token.starts_with("http://") || token.starts_with("https://"))
                    .map(|token| token.trim_end_matches(['.', ',', ')']).to_string());

                Ok(serde_json::to_value(RankDocsLlmOutput {
                    url,
                    reason: Some("llm_ranked".to_string()),
                })?)
            }
        })
        .build()
}

pub fn create_validate_docs_llm_tool(chat: Option<Arc<dyn ChatApi>>) -> atk_core::Result<ToolSpec> {
    ToolSpec::builder()
        .name("validate_docs_llm")
        .description("Use an LLM to validate whether a page is the official docs (heuristic check).")
        .input_schema(generate_schema::<ValidateDocsLlmInput>())
        .output_schema(generate_schema::<ValidateDocsLlmOutput>())
        .tag("docs")
        .tag(LLM_TAG)
        .tag("validation")
        .expected_tokens(500)
        .execute(move |ctx, params| {
            let chat = chat.clone();
            async move {
                let input: ValidateDocsLlmInput = parse_params("validate_docs_llm", params)?;
                let Some(chat) = chat else {
                    return Ok(serde_json::to_value(ValidateDocsLlmOutput {
                        url: input.url,
                        is_docs: false,
                        reason: Some(NO_BACKEND_REASON.to_string()),
                    })?);
                };

                let text: String = input
                    .content
                    .as_deref()
                    .unwrap_or_default()
                    .chars()
                    .take(VALIDATE_CONTENT_LIMIT)
                    .collect();
                let prompt = format!(
                    "You are verifying if a web page is the official documentation for a technology.\n\
                     Return strictly one of: YES or NO, then a short reason on the next line.\n\
                     Signals: docs engines (Docusaurus/MkDocs/Sphinx), sidebar, search docs input, API reference, version selector, canonical link.\n\
                     URL: {}\n\nCONTENT:\n{}",
                    input.url, text
                );

                let metered = MeteredChat::new(chat, ctx.usage_meter().clone());
                let response = metered
                    .complete(
                        ChatRequest::new(&input.model)
                            .system("Answer with 'YES' or 'NO' only on first line.")
                            .user(prompt)
                            .temperature(0.0),
                    )
                    .await?;

                let content = response.text().unwrap_or_default().trim().to_string();
                let mut lines = content.lines();
                let verdict = lines.next().unwrap_or_default().trim().to_uppercase();
                let reason = lines.next().map(|line| line.trim().to_string());

                Ok(serde_json::to_value(ValidateDocsLlmOutput {
                    url: input.url,
                    is_docs: verdict == "YES",
                    reason,
                })?)
            }
        })
        .build()
}
