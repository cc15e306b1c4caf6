use atk_core::{Error, Result};
use atk_tool::{ToolSchema, ToolSpec};
use serde_json::Value;

/// Creates an echo tool for testing purposes
pub fn create_echo_tool() -> Result<ToolSpec> {
    let schema = ToolSchema::new()
        .property("text", "string", "Text to echo back")
        .required("text")
        .build();

    ToolSpec::builder()
        .name("echo")
        .description("Echoes back the provided text. Useful for testing tool execution.")
        .input_schema(schema)
        .execute_sync(|ctx, params| {
            let text = params["text"]
                .as_str()
                .ok_or_else(|| Error::invalid_params("echo", "missing field `text`"))?;

            tracing::debug!(
                invocation_id = %ctx.invocation_id(),
                text = %text,
                "echo tool called"
            );

            Ok(Value::String(text.to_string()))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atk_core::AtkConfig;
    use atk_cost::CostLogger;
    use atk_tool::Toolkit;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo_tool() {
        let dir = tempfile::tempdir().unwrap();
        let logger = CostLogger::with_paths(
            true,
            dir.path().join("cost_logs.jsonl"),
            dir.path().join("daily"),
        );
        let mut toolkit = Toolkit::with_logger(AtkConfig::default(), logger);
        toolkit.register(create_echo_tool().unwrap());

        let result = toolkit.invoke("echo", json!({"text": "hi"})).await.unwrap();
        assert_eq!(result, json!("hi"));

        let err = toolkit.invoke("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }
}
