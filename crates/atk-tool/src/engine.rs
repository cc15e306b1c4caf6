//! Tool execution engine
//!
//! Applies the invocation contract uniformly to every call: parameter
//! validation, worker-thread offload for synchronous implementations, and a
//! capture window plus cost logging for tools tagged `"llm"`.

use crate::context::DefaultToolContext;
use crate::schema::validate_params;
use crate::spec::{LLM_TAG, ToolImpl, ToolSpec};
use atk_core::{Error, Result, ToolContext, UsageByModel};
use atk_cost::{CostEvent, CostLogger, estimate_cost};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub struct ExecutionEngine {
    logger: CostLogger,
}

impl ExecutionEngine {
    pub fn new(logger: CostLogger) -> Self {
        Self { logger }
    }

    /// Execute `spec` with `params` on the async path.
    ///
    /// Validation errors surface before the implementation runs. For
    /// LLM-tagged tools a cost event is written per model observed, whether
    /// the implementation succeeded or failed; in the failure case the
    /// original error re-propagates after logging. Dropping the returned
    /// future mid-flight abandons the invocation: nothing is logged and no
    /// capture cleanup is attempted.
    pub async fn execute(&self, spec: Arc<ToolSpec>, params: Value) -> Result<Value> {
        let mut params = params;
        validate_params(spec.name(), spec.input_schema(), &mut params)?;

        let ctx: Arc<dyn ToolContext> = Arc::new(DefaultToolContext::new());

        if !spec.has_tag(LLM_TAG) {
            return run_implementation(spec, ctx, params).await;
        }

        let meter = ctx.usage_meter().clone();
        meter.start_capture();
        let ts = epoch_seconds();
        let started = Instant::now();
        let tool_params = params.clone();

        let result = run_implementation(spec.clone(), ctx, params).await;

        let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        let usage = meter.stop_capture();
        self.log_usage(&spec, ts, usage, tool_params, execution_time_ms);

        result
    }

    /// Blocking counterpart of [`execute`](Self::execute).
    ///
    /// Runs the invocation to completion on a private current-thread
    /// runtime; intended for plain-thread callers, not for use inside an
    /// async context.
    pub fn execute_blocking(&self, spec: Arc<ToolSpec>, params: Value) -> Result<Value> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.execute(spec, params))
    }

    /// Price the captured usage and append one cost event per model.
    ///
    /// Best-effort by contract: the logger swallows IO failures, so this can
    /// never mask the invocation's own outcome.
    fn log_usage(
        &self,
        spec: &ToolSpec,
        ts: f64,
        usage: UsageByModel,
        tool_params: Value,
        execution_time_ms: f64,
    ) {
        if !self.logger.enabled() {
            return;
        }
        for (model, tokens) in usage {
            let cost = estimate_cost(&model, tokens.input_tokens, tokens.output_tokens);
            tracing::debug!(
                tool = %spec.name(),
                model = %model,
                input_tokens = tokens.input_tokens,
                output_tokens = tokens.output_tokens,
                total_cost = cost.total_cost,
                "logging cost event"
            );
            self.logger.log(CostEvent {
                ts,
                tool: spec.name().to_string(),
                model,
                input_tokens: tokens.input_tokens,
                output_tokens: tokens.output_tokens,
                currency: cost.currency,
                input_cost: cost.input_cost,
                output_cost: cost.output_cost,
                total_cost: cost.total_cost,
                meta: Value::Object(Default::default()),
                date: String::new(),
                tool_params: Some(tool_params.clone()),
                execution_time_ms: Some(execution_time_ms),
            });
        }
    }
}

async fn run_implementation(
    spec: Arc<ToolSpec>,
    ctx: Arc<dyn ToolContext>,
    params: Value,
) -> Result<Value> {
    match &spec.implementation {
        ToolImpl::Async(f) => f(ctx, params).await,
        ToolImpl::Sync(_) => {
            // Synchronous tools run on the blocking pool so they cannot
            // stall the scheduler.
            let moved = spec.clone();
            tokio::task::spawn_blocking(move || moved.call_sync(ctx, params))
                .await
                .map_err(|e| {
                    Error::tool_failed(spec.name(), anyhow::anyhow!("worker thread failed: {}", e))
                })?
        }
    }
}

fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ToolSchema;
    use atk_cost::CostLogger;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn engine_in(dir: &Path) -> ExecutionEngine {
        ExecutionEngine::new(CostLogger::with_paths(
            true,
            dir.join("cost_logs.jsonl"),
            dir.join("daily"),
        ))
    }

    fn echo_spec() -> Arc<ToolSpec> {
        Arc::new(
            ToolSpec::builder()
                .name("echo")
                .description("Returns its input text unchanged")
                .input_schema(
                    ToolSchema::new()
                        .property("text", "string", "Text to echo")
                        .required("text")
                        .build(),
                )
                .execute_sync(|_ctx, params| Ok(params["text"].clone()))
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_sync_tool_on_async_path() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let result = engine
            .execute(echo_spec(), json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(result, json!("hi"));
    }

    #[test]
    fn test_blocking_execution() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let result = engine
            .execute_blocking(echo_spec(), json!({"text": "hi"}))
            .unwrap();
        assert_eq!(result, json!("hi"));
    }

    #[tokio::test]
    async fn test_validation_error_skips_implementation() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let spec = Arc::new(
            ToolSpec::builder()
                .name("echo")
                .input_schema(
                    ToolSchema::new()
                        .property("text", "string", "Text to echo")
                        .required("text")
                        .build(),
                )
                .execute_sync(|_ctx, params| {
                    CALLS.fetch_add(1, Ordering::SeqCst);
                    Ok(params["text"].clone())
                })
                .build()
                .unwrap(),
        );

        let err = engine.execute(spec, json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_llm_tool_writes_no_cost_events() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        engine
            .execute(echo_spec(), json!({"text": "hi"}))
            .await
            .unwrap();

        assert!(!dir.path().join("cost_logs.jsonl").exists());
        assert!(!dir.path().join("daily").exists());
    }

    #[tokio::test]
    async fn test_llm_tool_logs_observed_usage() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let spec = Arc::new(
            ToolSpec::builder()
                .name("fake_llm")
                .input_schema(ToolSchema::new().build())
                .tag("llm")
                .execute(|ctx, _params| async move {
                    ctx.usage_meter().record("gpt-4o-mini", 100, 20);
                    Ok(json!("done"))
                })
                .build()
                .unwrap(),
        );

        engine.execute(spec, json!({})).await.unwrap();

        let contents = fs::read_to_string(dir.path().join("cost_logs.jsonl")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let event: CostEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event.tool, "fake_llm");
        assert_eq!(event.model, "gpt-4o-mini");
        assert_eq!(event.input_tokens, 100);
        assert_eq!(event.output_tokens, 20);
        assert!((event.total_cost - (event.input_cost + event.output_cost)).abs() < 1e-12);
        assert!(event.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_llm_tool_failure_still_logs_then_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let spec = Arc::new(
            ToolSpec::builder()
                .name("failing_llm")
                .input_schema(ToolSchema::new().build())
                .tag("llm")
                .execute(|ctx, _params| async move {
                    ctx.usage_meter().record("gpt-4o-mini", 50, 5);
                    Err(Error::tool_failed(
                        "failing_llm",
                        anyhow::anyhow!("backend exploded"),
                    ))
                })
                .build()
                .unwrap(),
        );

        let err = engine.execute(spec, json!({})).await.unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));

        let contents = fs::read_to_string(dir.path().join("cost_logs.jsonl")).unwrap();
        let event: CostEvent = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(event.input_tokens, 50);
        assert_eq!(event.output_tokens, 5);
    }

    #[tokio::test]
    async fn test_llm_tool_without_usage_logs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let spec = Arc::new(
            ToolSpec::builder()
                .name("quiet_llm")
                .input_schema(ToolSchema::new().build())
                .tag("llm")
                .execute(|_ctx, _params| async move { Ok(json!("no completions made")) })
                .build()
                .unwrap(),
        );

        engine.execute(spec, json!({})).await.unwrap();
        assert!(!dir.path().join("cost_logs.jsonl").exists());
    }

    #[tokio::test]
    async fn test_disabled_logger_suppresses_events() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ExecutionEngine::new(CostLogger::with_paths(
            false,
            dir.path().join("cost_logs.jsonl"),
            dir.path().join("daily"),
        ));

        let spec = Arc::new(
            ToolSpec::builder()
                .name("fake_llm")
                .input_schema(ToolSchema::new().build())
                .tag("llm")
                .execute(|ctx, _params| async move {
                    ctx.usage_meter().record("gpt-4o-mini", 100, 20);
                    Ok(json!("done"))
                })
                .build()
                .unwrap(),
        );

        engine.execute(spec, json!({})).await.unwrap();
        assert!(!dir.path().join("cost_logs.jsonl").exists());
    }

    #[tokio::test]
    async fn test_concurrent_llm_invocations_stay_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(engine_in(dir.path()));

        let make_spec = |name: &str, input: u64, output: u64| {
            Arc::new(
                ToolSpec::builder()
                    .name(name)
                    .input_schema(ToolSchema::new().build())
                    .tag("llm")
                    .execute(move |ctx, _params| async move {
                        // Yield between records so the two invocations interleave.
                        ctx.usage_meter().record("gpt-4o-mini", input / 2, 0);
                        tokio::task::yield_now().await;
                        ctx.usage_meter()
                            .record("gpt-4o-mini", input - input / 2, output);
                        Ok(json!("done"))
                    })
                    .build()
                    .unwrap(),
            )
        };

        let a = engine.execute(make_spec("llm_a", 100, 50), json!({}));
        let b = engine.execute(make_spec("llm_b", 200, 75), json!({}));
        let (ra, rb) = tokio::join!(a, b);
        ra.unwrap();
        rb.unwrap();

        let contents = fs::read_to_string(dir.path().join("cost_logs.jsonl")).unwrap();
        let events: Vec<CostEvent> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);

        let event_a = events.iter().find(|e| e.tool == "llm_a").unwrap();
        let event_b = events.iter().find(|e| e.tool == "llm_b").unwrap();
        assert_eq!(
            (event_a.input_tokens, event_a.output_tokens),
            (100, 50)
        );
        assert_eq!(
            (event_b.input_tokens, event_b.output_tokens),
            (200, 75)
        );
    }
}
