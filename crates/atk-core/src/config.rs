//! Configuration for ATK
//!
//! Every setting comes from an environment variable with a built-in default;
//! there is no configuration file. Boolean variables accept
//! `1`/`true`/`yes`/`on` (case-insensitive).

use std::env;
use std::path::PathBuf;

/// Runtime configuration shared by the toolkit crates
#[derive(Debug, Clone)]
pub struct AtkConfig {
    /// Whether the in-memory tool result cache is consulted (`ATK_CACHE_ENABLED`)
    pub cache_enabled: bool,

    /// Cache entry time-to-live in seconds (`ATK_CACHE_TTL`)
    pub cache_ttl_seconds: u64,

    /// HTTP timeout for outbound tool requests in seconds (`ATK_HTTP_TIMEOUT`)
    pub http_timeout_seconds: f64,

    /// Whether LLM cost events are written at all (`ATK_COST_LOG_ENABLED`)
    pub cost_log_enabled: bool,

    /// Fixed-path append-only cost log (`ATK_COST_LOG_PATH`)
    pub cost_log_path: PathBuf,

    /// Directory holding one cost log file per calendar day (`ATK_COST_LOG_DIR`)
    pub cost_log_dir: PathBuf,
}

impl Default for AtkConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_seconds: 900,
            http_timeout_seconds: 8.0,
            cost_log_enabled: true,
            cost_log_path: default_cost_log_path(),
            cost_log_dir: PathBuf::from("data/cost_logs"),
        }
    }
}

impl AtkConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            cache_enabled: env_bool("ATK_CACHE_ENABLED", defaults.cache_enabled),
            cache_ttl_seconds: env_u64("ATK_CACHE_TTL", defaults.cache_ttl_seconds),
            http_timeout_seconds: env_f64("ATK_HTTP_TIMEOUT", defaults.http_timeout_seconds),
            cost_log_enabled: env_bool("ATK_COST_LOG_ENABLED", defaults.cost_log_enabled),
            cost_log_path: env::var("ATK_COST_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cost_log_path),
            cost_log_dir: env::var("ATK_COST_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cost_log_dir),
        };
        tracing::debug!(?config, "loaded configuration from environment");
        config
    }
}

fn default_cost_log_path() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".atk").join("cost_logs.jsonl"),
        Err(_) => PathBuf::from(".atk/cost_logs.jsonl"),
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => matches!(
            val.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AtkConfig::default();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl_seconds, 900);
        assert_eq!(config.http_timeout_seconds, 8.0);
        assert!(config.cost_log_enabled);
        assert!(config.cost_log_path.ends_with("cost_logs.jsonl"));
    }

    #[test]
    fn test_env_bool_parsing() {
        unsafe {
            env::set_var("ATK_TEST_BOOL", "YES");
        }
        assert!(env_bool("ATK_TEST_BOOL", false));

        unsafe {
            env::set_var("ATK_TEST_BOOL", "0");
        }
        assert!(!env_bool("ATK_TEST_BOOL", true));

        unsafe {
            env::remove_var("ATK_TEST_BOOL");
        }
        assert!(env_bool("ATK_TEST_BOOL", true));
    }

    #[test]
    fn test_env_numeric_fallback() {
        unsafe {
            env::set_var("ATK_TEST_NUM", "not-a-number");
        }
        assert_eq!(env_u64("ATK_TEST_NUM", 42), 42);
        assert_eq!(env_f64("ATK_TEST_NUM", 1.5), 1.5);
        unsafe {
            env::remove_var("ATK_TEST_NUM");
        }
    }
}
