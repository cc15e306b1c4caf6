//! Registering and invoking a custom tool.
//!
//! Run with: cargo run --example tool_usage

use atk::{AtkConfig, ToolSchema, ToolSpec, Toolkit};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut toolkit = Toolkit::with_config(AtkConfig::from_env());

    toolkit.register(
        ToolSpec::builder()
            .name("shout")
            .description("Upper-cases the provided text")
            .input_schema(
                ToolSchema::new()
                    .property("text", "string", "Text to upper-case")
                    .required("text")
                    .build(),
            )
            .execute_sync(|_ctx, params| {
                let text = params["text"].as_str().unwrap_or_default();
                Ok(json!(text.to_uppercase()))
            })
            .build()?,
    );

    let result = toolkit.invoke("shout", json!({"text": "hello"})).await?;
    println!("shout -> {}", result);

    // Missing required arguments fail validation before the tool runs.
    match toolkit.invoke("shout", json!({})).await {
        Err(e) => println!("expected validation error: {}", e),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
