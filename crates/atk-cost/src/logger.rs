//! Append-only cost log and aggregate queries
//!
//! Every event is written as one JSON line to a fixed-path legacy log and to
//! a per-day file under the log directory. Logging is best-effort: IO
//! failures are logged and swallowed so accounting can never break the tool
//! call that produced the event.

use crate::event::{CostEvent, date_string};
use atk_core::AtkConfig;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct CostLogger {
    enabled: bool,
    log_path: PathBuf,
    daily_dir: PathBuf,
}

/// Aggregates for one tool over a scan window
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolUsageStats {
    pub calls: u64,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub avg_input_tokens: f64,
    pub avg_output_tokens: f64,
    pub models: BTreeMap<String, ModelBreakdown>,
}

/// Per-model slice of a tool's usage
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelBreakdown {
    pub calls: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_cost: f64,
}

impl CostLogger {
    pub fn new(config: &AtkConfig) -> Self {
        Self {
            enabled: config.cost_log_enabled,
            log_path: config.cost_log_path.clone(),
            daily_dir: config.cost_log_dir.clone(),
        }
    }

    /// Construct with explicit paths (used by tests and the CLI)
    pub fn with_paths(enabled: bool, log_path: PathBuf, daily_dir: PathBuf) -> Self {
        Self {
            enabled,
            log_path,
            daily_dir,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Append `event` to the legacy log and the day-partitioned log.
    ///
    /// No-op when cost logging is disabled. Failures are traced and dropped.
    pub fn log(&self, mut event: CostEvent) {
        if !self.enabled {
            return;
        }
        event.ensure_date();

        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, tool = %event.tool, "cost event failed to serialize");
                return;
            }
        };

        if let Err(e) = append_line(&self.log_path, &line) {
            tracing::warn!(error = %e, path = %self.log_path.display(), "cost log append failed");
        }

        let daily_path = self.daily_file(&event.date);
        if let Err(e) = append_line(&daily_path, &line) {
            tracing::warn!(error = %e, path = %daily_path.display(), "daily cost log append failed");
        }
    }

    /// Aggregates for one tool over the trailing `days` days, or `None` when
    /// no events were found
    pub fn stats_for_tool(&self, tool: &str, days: i64) -> Option<ToolUsageStats> {
        let events = self.load_events(days);
        let selected: Vec<&CostEvent> = events.iter().filter(|e| e.tool == tool).collect();
        if selected.is_empty() {
            return None;
        }
        Some(aggregate(&selected))
    }

    /// Aggregates over the trailing `days` days, grouped by tool name
    pub fn recent_usage(&self, days: i64) -> BTreeMap<String, ToolUsageStats> {
        let events = self.load_events(days);
        let mut by_tool: BTreeMap<String, Vec<&CostEvent>> = BTreeMap::new();
        for event in &events {
            by_tool.entry(event.tool.clone()).or_default().push(event);
        }
        by_tool
            .into_iter()
            .map(|(tool, events)| (tool, aggregate(&events)))
            .collect()
    }

    fn daily_file(&self, date: &str) -> PathBuf {
        self.daily_dir.join(format!("costs-{}.jsonl", date))
    }

    /// Read events from the day-partitioned logs for the trailing window.
    ///
    /// Missing files mean zero events for that day; malformed lines are
    /// skipped one at a time so a corrupt record cannot abort a scan.
    fn load_events(&self, days: i64) -> Vec<CostEvent> {
        let mut events = Vec::new();
        let today = Utc::now().date_naive();

        for offset in (0..=days.max(0)).rev() {
            let date = today - Duration::days(offset);
            let path = self.daily_file(&date.format("%Y-%m-%d").to_string());
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(_) => continue,
            };
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<CostEvent>(line) {
                    Ok(event) => events.push(event),
                    Err(e) => {
                        tracing::debug!(error = %e, path = %path.display(), "skipping malformed cost log line");
                    }
                }
            }
        }
        events
    }
}

fn aggregate(events: &[&CostEvent]) -> ToolUsageStats {
    let mut stats = ToolUsageStats::default();
    for event in events {
        stats.calls += 1;
        stats.total_cost += event.total_cost;
        stats.total_input_tokens += event.input_tokens;
        stats.total_output_tokens += event.output_tokens;

        let model = stats.models.entry(event.model.clone()).or_default();
        model.calls += 1;
        model.input_tokens += event.input_tokens;
        model.output_tokens += event.output_tokens;
        model.total_cost += event.total_cost;
    }
    if stats.calls > 0 {
        let calls = stats.calls as f64;
        stats.avg_cost = stats.total_cost / calls;
        stats.avg_input_tokens = stats.total_input_tokens as f64 / calls;
        stats.avg_output_tokens = stats.total_output_tokens as f64 / calls;
    }
    stats
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_event(tool: &str, model: &str, input: u64, output: u64) -> CostEvent {
        CostEvent {
            ts: Utc::now().timestamp() as f64,
            tool: tool.to_string(),
            model: model.to_string(),
            input_tokens: input,
            output_tokens: output,
            currency: "USD".to_string(),
            input_cost: 0.001,
            output_cost: 0.002,
            total_cost: 0.003,
            meta: json!({}),
            date: String::new(),
            tool_params: None,
            execution_time_ms: Some(25.0),
        }
    }

    fn test_logger(dir: &Path) -> CostLogger {
        CostLogger::with_paths(true, dir.join("cost_logs.jsonl"), dir.join("daily"))
    }

    #[test]
    fn test_log_appends_to_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());

        logger.log(test_event("rank_docs_llm", "gpt-4o-mini", 100, 20));

        let legacy = fs::read_to_string(dir.path().join("cost_logs.jsonl")).unwrap();
        assert_eq!(legacy.lines().count(), 1);

        let date = date_string(Utc::now().timestamp() as f64);
        let daily =
            fs::read_to_string(dir.path().join("daily").join(format!("costs-{}.jsonl", date)))
                .unwrap();
        assert_eq!(daily.lines().count(), 1);

        let parsed: CostEvent = serde_json::from_str(legacy.lines().last().unwrap()).unwrap();
        assert_eq!(parsed.tool, "rank_docs_llm");
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(parsed.input_tokens, 100);
        assert_eq!(parsed.output_tokens, 20);
        assert_eq!(parsed.date, date);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = CostLogger::with_paths(
            false,
            dir.path().join("cost_logs.jsonl"),
            dir.path().join("daily"),
        );

        logger.log(test_event("rank_docs_llm", "gpt-4o-mini", 100, 20));
        assert!(!dir.path().join("cost_logs.jsonl").exists());
        assert!(!dir.path().join("daily").exists());
    }

    #[test]
    fn test_stats_aggregation() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());

        logger.log(test_event("rank_docs_llm", "gpt-4o-mini", 100, 20));
        logger.log(test_event("rank_docs_llm", "gpt-4o", 200, 40));
        logger.log(test_event("validate_docs_llm", "gpt-4o-mini", 50, 5));

        let stats = logger.stats_for_tool("rank_docs_llm", 7).unwrap();
        assert_eq!(stats.calls, 2);
        assert_eq!(stats.total_input_tokens, 300);
        assert_eq!(stats.avg_input_tokens, 150.0);
        assert!((stats.total_cost - 0.006).abs() < 1e-9);
        assert_eq!(stats.models.len(), 2);
        assert_eq!(stats.models["gpt-4o"].input_tokens, 200);

        let recent = logger.recent_usage(7);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent["validate_docs_llm"].calls, 1);

        assert!(logger.stats_for_tool("fetch_page", 7).is_none());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());

        logger.log(test_event("rank_docs_llm", "gpt-4o-mini", 100, 20));

        let date = date_string(Utc::now().timestamp() as f64);
        let daily_path = dir.path().join("daily").join(format!("costs-{}.jsonl", date));
        let mut contents = fs::read_to_string(&daily_path).unwrap();
        contents.push_str("{not json}\n");
        fs::write(&daily_path, contents).unwrap();

        logger.log(test_event("rank_docs_llm", "gpt-4o-mini", 10, 2));

        let stats = logger.stats_for_tool("rank_docs_llm", 0).unwrap();
        assert_eq!(stats.calls, 2);
        assert_eq!(stats.total_input_tokens, 110);
    }
}
