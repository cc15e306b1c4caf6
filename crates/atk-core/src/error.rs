use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters for tool '{tool}': {message}")]
    InvalidParams { tool: String, message: String },

    #[error("Tool '{tool}' execution failed: {source}")]
    ToolFailed {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Chat request failed: {0}")]
    ChatError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Helper for creating parameter validation errors
    ///
    /// # Example
    /// ```
    /// use atk_core::Error;
    /// let err = Error::invalid_params("web_search", "missing field `query`");
    /// ```
    pub fn invalid_params(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidParams {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Helper for wrapping an implementation failure with its tool name
    pub fn tool_failed(tool: impl Into<String>, source: anyhow::Error) -> Self {
        Error::ToolFailed {
            tool: tool.into(),
            source,
        }
    }

    /// Helper for creating general errors with a message
    ///
    /// # Example
    /// ```
    /// use atk_core::Error;
    /// let err = Error::message("Something went wrong");
    /// ```
    pub fn message(msg: impl Into<String>) -> Self {
        Error::Other(anyhow::anyhow!("{}", msg.into()))
    }
}
