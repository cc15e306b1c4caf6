use crate::spec::ToolSpec;
use atk_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Insertion-ordered mapping from tool name to its registered spec.
///
/// Registration is expected to happen once at startup; the registry itself
/// carries no locking. Re-registering a name overwrites the previous entry
/// (last write wins) with a warning, keeping the original listing position.
#[derive(Default)]
pub struct ToolRegistry {
    specs: Vec<Arc<ToolSpec>>,
    index: HashMap<String, usize>,
}

/// Display-friendly projection of a spec for external catalogs
/// (e.g. LLM function-calling tool lists)
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_tokens: Option<u32>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `spec`, overwriting any existing registration with the same name
    pub fn register(&mut self, spec: ToolSpec) {
        let name = spec.name().to_string();
        let spec = Arc::new(spec);
        match self.index.get(&name) {
            Some(&position) => {
                tracing::warn!(tool = %name, "re-registering tool; previous registration is shadowed");
                self.specs[position] = spec;
            }
            None => {
                self.index.insert(name, self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<ToolSpec>> {
        self.index
            .get(name)
            .map(|&position| self.specs[position].clone())
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All registered specs, in registration order
    pub fn list(&self) -> &[Arc<ToolSpec>] {
        &self.specs
    }

    pub fn summaries(&self) -> Vec<ToolSummary> {
        self.specs
            .iter()
            .map(|spec| ToolSummary {
                name: spec.name().to_string(),
                description: spec.description().to_string(),
                parameters: spec.input_schema().clone(),
                tags: spec.tags().to_vec(),
                expected_tokens: spec.expected_tokens(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
