//! Heuristic documentation ranking
//!
//! Scores candidate URLs by signals that tend to separate official
//! documentation from Q&A threads, package indexes, and bare repositories.
//! Best-effort by design; the LLM re-ranker exists for the cases these
//! signals miss.

use crate::types::{RankedResult, SearchResult};
use atk_tool::{ToolSpec, generate_schema, parse_params};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DOC_KEYWORDS: &[&str] = &[
    "docs",
    "documentation",
    "guide",
    "guides",
    "api",
    "reference",
    "handbook",
    "manual",
    "developer",
    "developers",
];

const DOC_PATH_HINTS: &[&str] = &[
    "/docs",
    "/documentation",
    "/api",
    "/reference",
    "/handbook",
    "/manual",
];

const UNOFFICIAL_HINTS: &[&str] = &[
    "stackoverflow.com",
    "medium.com",
    "dev.to",
    "reddit.com",
    "news.ycombinator.com",
    "quora.com",
    "zhihu.com",
    "baidu.com",
    "bilibili.com",
    "youtube.com",
    "x.com",
    "twitter.com",
    "facebook.com",
    "linkedin.com",
    "stackshare.io",
];

const REPO_SITES: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

const PACKAGE_INDEX_SITES: &[&str] = &[
    "pypi.org",
    "npmjs.com",
    "crates.io",
    "rubygems.org",
    "packagist.org",
];

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RankDocsInput {
    /// Technology name
    pub technology: String,
    /// Candidate results to rank
    pub candidates: Vec<SearchResult>,
}

struct DomainParts {
    sub: String,
    domain_label: String,
    dom: String,
    fqdn: String,
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Split a URL's host into subdomain / registrable domain.
///
/// Approximation without a public-suffix database: the suffix is the last
/// label, or the last two for common country suffixes and documentation
/// hosting domains. Close enough for scoring signals.
fn domain_parts(url_str: &str) -> DomainParts {
    let host = match url::Url::parse(url_str) {
        Ok(parsed) => parsed.host_str().unwrap_or("").to_ascii_lowercase(),
        Err(_) => String::new(),
    };
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.is_empty() {
        return DomainParts {
            sub: String::new(),
            domain_label: String::new(),
            dom: String::new(),
            fqdn: host,
        };
    }

    let two_part_suffix = labels.len() >= 3 && {
        let a = labels[labels.len() - 2];
        let b = labels[labels.len() - 1];
        (matches!(a, "co" | "com" | "org" | "net" | "ac" | "gov" | "edu") && b.len() == 2)
            || matches!((a, b), ("github", "io") | ("readthedocs", "io") | ("gitlab", "io"))
    };
    let suffix_labels = if two_part_suffix { 2 } else { 1 };

    let domain_index = labels.len().saturating_sub(suffix_labels + 1);
    DomainParts {
        sub: labels[..domain_index].join("."),
        domain_label: labels[domain_index].to_string(),
        dom: labels[domain_index..].join("."),
        fqdn: host,
    }
}

fn score(result: &SearchResult, technology: &str) -> f64 {
    let tech = normalize(technology);
    let title = normalize(&result.title);
    let snippet = normalize(&result.snippet);
    let lower_url = result.url.to_ascii_lowercase();
    let parts = domain_parts(&result.url);
    let path = if parts.dom.is_empty() {
        lower_url.clone()
    } else {
        lower_url
            .split_once(&parts.dom)
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| lower_url.clone())
    };

    let title_has_keyword = DOC_KEYWORDS.iter().any(|k| title.contains(k));
    let path_has_hint = DOC_PATH_HINTS.iter().any(|h| path.contains(h));

    let mut score = 0.0;
    if !tech.is_empty()
        && (title.contains(&tech) || snippet.contains(&tech) || lower_url.contains(&tech))
    {
        score += 3.0;
    }
    if title_has_keyword {
        score += 2.5;
    }
    if path_has_hint {
        score += 2.0;
    }
    if parts.sub.contains("docs") || parts.sub.contains("developer") {
        score += 2.0;
    }
    if parts.dom.ends_with("readthedocs.io") || parts.dom.ends_with("github.io") {
        score += 1.5;
    }
    if parts.domain_label == tech {
        score += 1.5;
    }

    // LangGraph's documentation lives under the LangChain umbrella.
    if tech == "langgraph"
        && (parts.fqdn.contains("langchain-ai.github.io")
            || matches!(
                parts.dom.as_str(),
                "langchain.com" | "langchain.dev" | "langgraph.dev"
            ))
    {
        score += 4.0;
    }

    if title.contains("official") || snippet.contains("official") {
        score += 1.0;
    }

    if UNOFFICIAL_HINTS.iter().any(|u| parts.dom.contains(u)) {
        score -= 2.5;
    }
    if PACKAGE_INDEX_SITES.iter().any(|u| parts.dom.contains(u)) {
        score -= 1.5;
    }
    if REPO_SITES.iter().any(|u| parts.dom.contains(u))
        && !(path.contains("/wiki") || path.contains("/docs") || path.contains("/documentation"))
    {
        score -= 1.5;
    }
    if !title_has_keyword && !path_has_hint {
        score -= 0.5;
    }

    score
}

/// Rank candidates by descending documentation score
pub fn rank_docs(input: &RankDocsInput) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = input
        .candidates
        .iter()
        .map(|result| RankedResult {
            result: result.clone(),
            score: score(result, &input.technology),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

pub fn create_rank_docs_tool() -> atk_core::Result<ToolSpec> {
    ToolSpec::builder()
        .name("rank_docs")
        .description(
            "Rank candidate documentation URLs by heuristic scores favoring likely official docs.",
        )
        .input_schema(generate_schema::<RankDocsInput>())
        .tag("docs")
        .tag("ranking")
        .execute_sync(|_ctx, params| {
            let input: RankDocsInput = parse_params("rank_docs", params)?;
            Ok(serde_json::to_value(rank_docs(&input))?)
        })
        .build()
}
