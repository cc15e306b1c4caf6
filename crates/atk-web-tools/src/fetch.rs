//! Page fetch tool
//!
//! Short-timeout GET that reports transport failures as a zero status
//! instead of an error, so composition tools can treat "unreachable" as an
//! ordinary outcome.

use atk_tool::{ToolSpec, generate_schema, parse_params};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageInput {
    /// URL to fetch
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageOutput {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status, or 0 when the request never completed
    pub status: u16,
    pub content: Option<String>,
    pub content_type: Option<String>,
}

pub async fn fetch_page(client: &reqwest::Client, input: &FetchPageInput) -> FetchPageOutput {
    match try_fetch(client, &input.url).await {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(url = %input.url, error = %e, "page fetch failed");
            FetchPageOutput {
                url: input.url.clone(),
                status: 0,
                content: None,
                content_type: None,
            }
        }
    }
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> anyhow::Result<FetchPageOutput> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    // Only textual bodies are returned; binary payloads are dropped.
    let content = if content_type.as_deref().is_some_and(|ct| ct.contains("text")) {
        Some(response.text().await?)
    } else {
        None
    };

    Ok(FetchPageOutput {
        url: final_url,
        status,
        content,
        content_type,
    })
}

pub fn create_fetch_page_tool(client: reqwest::Client) -> atk_core::Result<ToolSpec> {
    ToolSpec::builder()
        .name("fetch_page")
        .description(
            "Fetch a web page with a short timeout; returns status, content, and content-type.",
        )
        .input_schema(generate_schema::<FetchPageInput>())
        .output_schema(generate_schema::<FetchPageOutput>())
        .tag("net")
        .execute(move |_ctx, params| {
            let client = client.clone();
            async move {
                let input: FetchPageInput = parse_params("fetch_page", params)?;
                let output = fetch_page(&client, &input).await;
                Ok(serde_json::to_value(output)?)
            }
        })
        .build()
}
