use atk_core::{ToolContext, UsageMeter};

/// Default implementation of ToolContext.
///
/// The engine creates one per invocation, with a fresh meter, which is what
/// keeps token accounting isolated between concurrent invocations.
#[derive(Debug, Clone)]
pub struct DefaultToolContext {
    invocation_id: String,
    meter: UsageMeter,
}

impl DefaultToolContext {
    pub fn new() -> Self {
        Self {
            invocation_id: uuid::Uuid::new_v4().to_string(),
            meter: UsageMeter::new(),
        }
    }

    pub fn with_invocation_id(invocation_id: String) -> Self {
        Self {
            invocation_id,
            meter: UsageMeter::new(),
        }
    }
}

impl Default for DefaultToolContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolContext for DefaultToolContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn usage_meter(&self) -> &UsageMeter {
        &self.meter
    }
}
