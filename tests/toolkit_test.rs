use atk::{
    AtkConfig, CostLogger, Error, ToolSchema, ToolSpec, Toolkit, default_toolkit,
    register_web_tools_with,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn isolated_toolkit(dir: &tempfile::TempDir) -> Toolkit {
    let logger = CostLogger::with_paths(
        true,
        dir.path().join("cost_logs.jsonl"),
        dir.path().join("daily"),
    );
    Toolkit::with_logger(AtkConfig::default(), logger)
}

fn echo_spec() -> ToolSpec {
    ToolSpec::builder()
        .name("echo")
        .description("Returns its single string input unchanged")
        .input_schema(
            ToolSchema::new()
                .property("text", "string", "Text to echo back")
                .required("text")
                .build(),
        )
        .execute_sync(|_ctx, params| Ok(params["text"].clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_echo_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);
    toolkit.register(echo_spec());

    let result = toolkit.invoke("echo", json!({"text": "hi"})).await.unwrap();
    assert_eq!(result, json!("hi"));

    let err = toolkit.invoke("echo", json!({})).await.unwrap_err();
    assert!(matches!(err, Error::InvalidParams { .. }));
}

#[test]
fn test_echo_scenario_blocking() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);
    toolkit.register(echo_spec());

    let result = toolkit.invoke_blocking("echo", json!({"text": "hi"})).unwrap();
    assert_eq!(result, json!("hi"));
}

#[tokio::test]
async fn test_registered_name_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);
    toolkit.register(echo_spec());

    let spec = toolkit.registry().get("echo").unwrap();
    assert_eq!(spec.name(), "echo");
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = isolated_toolkit(&dir);

    let err = toolkit.invoke("does_not_exist", json!({})).await.unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(name) if name == "does_not_exist"));
    // A failed lookup never touches the cost log.
    assert!(!dir.path().join("cost_logs.jsonl").exists());
}

#[tokio::test]
async fn test_validation_happens_before_implementation() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    toolkit.register(
        ToolSpec::builder()
            .name("counting")
            .input_schema(
                ToolSchema::new()
                    .property("value", "integer", "Required value")
                    .required("value")
                    .build(),
            )
            .execute_sync(move |_ctx, params| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(params["value"].clone())
            })
            .build()
            .unwrap(),
    );

    let err = toolkit.invoke("counting", json!({})).await.unwrap_err();
    assert!(matches!(err, Error::InvalidParams { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let err = toolkit
        .invoke("counting", json!({"value": "not a number"}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParams { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    toolkit.invoke("counting", json!({"value": 7})).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_implementation_error_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);

    toolkit.register(
        ToolSpec::builder()
            .name("broken")
            .input_schema(ToolSchema::new().build())
            .execute(|_ctx, _params| async move {
                Err(Error::tool_failed("broken", anyhow::anyhow!("boom")))
            })
            .build()
            .unwrap(),
    );

    let err = toolkit.invoke("broken", json!({})).await.unwrap_err();
    match err {
        Error::ToolFailed { tool, source } => {
            assert_eq!(tool, "broken");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("expected ToolFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_default_toolkit_registers_builtin_tools() {
    let toolkit = default_toolkit().unwrap();
    let names: Vec<String> = toolkit
        .summaries()
        .into_iter()
        .map(|summary| summary.name)
        .collect();

    for expected in [
        "web_search",
        "fetch_page",
        "rank_docs",
        "validate_docs_page",
        "find_docs",
        "find_docs_many",
        "find_docs_validated",
        "rank_docs_llm",
        "validate_docs_llm",
        "echo",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
}

#[tokio::test]
async fn test_summaries_expose_llm_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let mut toolkit = isolated_toolkit(&dir);
    register_web_tools_with(
        &mut toolkit,
        Arc::new(NoopProvider),
        None,
    )
    .unwrap();

    let summaries = toolkit.summaries();
    let rank_llm = summaries
        .iter()
        .find(|summary| summary.name == "rank_docs_llm")
        .unwrap();
    assert!(rank_llm.tags.contains(&"llm".to_string()));
    assert_eq!(rank_llm.expected_tokens, Some(350));
    assert!(rank_llm.parameters["properties"]["technology"].is_object());
}

struct NoopProvider;

#[async_trait::async_trait]
impl atk::SearchProvider for NoopProvider {
    async fn search(
        &self,
        _query: &str,
        _max_results: usize,
    ) -> atk::Result<Vec<atk::SearchResult>> {
        Ok(Vec::new())
    }
}
