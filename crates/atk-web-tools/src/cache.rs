//! In-memory TTL cache for tool results
//!
//! Keys are built by the tools from their name and arguments; values are the
//! serialized result. Entries expire passively: an expired entry is dropped
//! the next time it is read.

use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

pub struct ToolCache {
    enabled: bool,
    ttl: Duration,
    store: DashMap<String, (Instant, Value)>,
}

impl ToolCache {
    pub fn new(enabled: bool, ttl_seconds: u64) -> Self {
        Self {
            enabled,
            ttl: Duration::from_secs(ttl_seconds),
            store: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.enabled {
            return None;
        }
        let expired = match self.store.get(key) {
            Some(entry) => {
                let (stored_at, value) = entry.value();
                if stored_at.elapsed() <= self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.store.remove(key);
        }
        None
    }

    pub fn put(&self, key: String, value: Value) {
        if !self.enabled {
            return;
        }
        self.store.insert(key, (Instant::now(), value));
    }

    pub fn clear(&self) {
        self.store.clear();
    }
}
