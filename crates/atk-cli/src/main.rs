//! atk command line
//!
//! Subcommands: list registered tools, run a tool with key=value arguments,
//! find documentation for a technology, and print cost analytics from the
//! usage log.

use atk_core::AtkConfig;
use atk_cost::{CostLogger, ToolUsageStats};
use atk_tool::Toolkit;
use atk_web_tools::register_web_tools;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(
    name = "atk",
    about = "Tool registry and invocation framework for LLM-driven agents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all available tools
    List {
        /// Filter by tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Print JSON output with parameter schemas
        #[arg(long)]
        json: bool,
    },
    /// Run a tool
    Run {
        /// Tool name
        tool: String,
        /// key=value argument pairs (values may be JSON)
        #[arg(long = "kv")]
        kv: Vec<String>,
        /// Print JSON output
        #[arg(long)]
        json: bool,
    },
    /// Find documentation for a technology
    Docs {
        technology: String,
        /// Validate page content
        #[arg(long)]
        validate: bool,
        /// Print JSON output
        #[arg(long)]
        json: bool,
    },
    /// Print cost analytics from the usage log
    Costs {
        /// Restrict to one tool
        #[arg(long)]
        tool: Option<String>,
        /// Number of trailing days to scan
        #[arg(long, default_value_t = 30)]
        days: i64,
        /// Print JSON output
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AtkConfig::from_env();
    let mut toolkit = Toolkit::with_config(config.clone());
    register_web_tools(&mut toolkit)?;

    match cli.command {
        Command::List { tag, json } => {
            let summaries: Vec<_> = toolkit
                .summaries()
                .into_iter()
                .filter(|summary| tag.iter().all(|t| summary.tags.contains(t)))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in summaries {
                    let suffix = if summary.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [tags: {}]", summary.tags.join(", "))
                    };
                    println!("{}: {}{}", summary.name, summary.description, suffix);
                }
            }
        }
        Command::Run { tool, kv, json } => {
            let params = parse_kv(&kv);
            let result = toolkit.invoke(&tool, params).await?;
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Command::Docs {
            technology,
            validate,
            json,
        } => {
            let tool = if validate {
                "find_docs_validated"
            } else {
                "find_docs"
            };
            let result = toolkit
                .invoke(tool, serde_json::json!({"technology": technology}))
                .await?;
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                match result["url"].as_str() {
                    Some(url) => println!("{}", url),
                    None => println!("No documentation found"),
                }
            }
        }
        Command::Costs { tool, days, json } => {
            let logger = CostLogger::new(&config);
            match tool {
                Some(tool) => match logger.stats_for_tool(&tool, days) {
                    Some(stats) => {
                        if json {
                            println!("{}", serde_json::to_string_pretty(&stats)?);
                        } else {
                            print_stats(&tool, &stats);
                        }
                    }
                    None => println!("No cost data found for tool: {}", tool),
                },
                None => {
                    let usage = logger.recent_usage(days);
                    if usage.is_empty() {
                        println!("No cost data found for the last {} days", days);
                    } else if json {
                        println!("{}", serde_json::to_string_pretty(&usage)?);
                    } else {
                        for (tool, stats) in &usage {
                            print_stats(tool, stats);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Parse `key=value` pairs; values that parse as JSON keep their type,
/// everything else is passed through as a string
fn parse_kv(pairs: &[String]) -> Value {
    let mut map = Map::new();
    for pair in pairs {
        if let Some((key, value)) = pair.split_once('=') {
            let parsed = serde_json::from_str(value)
                .unwrap_or_else(|_| Value::String(value.to_string()));
            map.insert(key.to_string(), parsed);
        }
    }
    Value::Object(map)
}

fn print_stats(tool: &str, stats: &ToolUsageStats) {
    println!("{}:", tool);
    println!("  Calls: {}", stats.calls);
    println!("  Total cost: ${:.6}", stats.total_cost);
    println!("  Avg cost per call: ${:.6}", stats.avg_cost);
    println!("  Avg input tokens: {:.1}", stats.avg_input_tokens);
    println!("  Avg output tokens: {:.1}", stats.avg_output_tokens);
    let models: Vec<&str> = stats.models.keys().map(String::as_str).collect();
    println!("  Models: {}", models.join(", "));
}
