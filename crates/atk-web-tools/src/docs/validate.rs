//! Heuristic documentation-page validation

use atk_tool::{ToolSpec, generate_schema, parse_params};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Textual signals that a page was rendered by a documentation engine
static DOC_HINTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "sidebar",
        "search docs",
        "api reference",
        "table of contents",
        "docsify|docusaurus|mkdocs|sphinx",
        r"class\s+\w+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ValidateDocsInput {
    /// URL of the fetched page
    pub url: String,
    /// Page text content
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateDocsOutput {
    pub url: String,
    pub is_docs: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

pub fn validate_docs_page(input: &ValidateDocsInput) -> ValidateDocsOutput {
    let content = match &input.content {
        Some(content) if !content.is_empty() => content,
        _ => {
            return ValidateDocsOutput {
                url: input.url.clone(),
                is_docs: false,
                reason: Some("no_content".to_string()),
            };
        }
    };

    let text = content.to_lowercase();
    for pattern in DOC_HINTS.iter() {
        if pattern.is_match(&text) {
            return ValidateDocsOutput {
                url: input.url.clone(),
                is_docs: true,
                reason: Some(format!("match:{}", pattern.as_str())),
            };
        }
    }

    ValidateDocsOutput {
        url: input.url.clone(),
        is_docs: false,
        reason: Some("no_match".to_string()),
    }
}

pub fn create_validate_docs_tool() -> atk_core::Result<ToolSpec> {
    ToolSpec::builder()
        .name("validate_docs_page")
        .description("Heuristically validate if a fetched page looks like documentation.")
        .input_schema(generate_schema::<ValidateDocsInput>())
        .output_schema(generate_schema::<ValidateDocsOutput>())
        .tag("docs")
        .tag("validation")
        .execute_sync(|_ctx, params| {
            let input: ValidateDocsInput = parse_params("validate_docs_page", params)?;
            Ok(serde_json::to_value(validate_docs_page(&input))?)
        })
        .build()
}
