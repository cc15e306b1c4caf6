//! Documentation discovery tools
//!
//! Heuristic ranking and validation plus the composition tools built on
//! search and fetch, and the LLM-backed variants of each.

mod find;
mod llm;
mod rank;
mod validate;

pub use find::{
    FindDocsInput, FindDocsOutput, create_find_docs_many_tool, create_find_docs_tool,
    create_find_docs_validated_tool, find_docs,
};
pub use llm::{create_rank_docs_llm_tool, create_validate_docs_llm_tool};
pub use rank::{RankDocsInput, create_rank_docs_tool, rank_docs};
pub use validate::{
    ValidateDocsInput, ValidateDocsOutput, create_validate_docs_tool, validate_docs_page,
};
