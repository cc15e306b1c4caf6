//! Minimal end-to-end flow: list the registered tools, then look up
//! documentation for a technology.
//!
//! Run with: cargo run --example quickstart

use atk::{default_toolkit, find_docs_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let toolkit = default_toolkit()?;

    println!("Registered tools:");
    for summary in toolkit.summaries() {
        println!("  {}: {}", summary.name, summary.description);
    }

    let url = find_docs_url(&toolkit, "tokio").await?;
    println!(
        "\ntokio docs: {}",
        url.unwrap_or_else(|| "not found".to_string())
    );
    Ok(())
}
