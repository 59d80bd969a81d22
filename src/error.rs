use thiserror::Error;

/// Errors surfaced by shadow-pierce
#[derive(Debug, Error)]
pub enum ShadowError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The query was rejected before any search attempt was made.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The deadline elapsed without a match. Carries the original query
    /// (reconstructed path string or search text) for diagnostics.
    #[error("No element found for {query}")]
    ElementNotFound { query: String },

    /// The driver failed to run a search program. Not a timing issue,
    /// so never retried.
    #[error("Driver execution failed: {0}")]
    DriverExecution(String),

    #[error("Interaction failed: {0}")]
    InteractionFailed(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShadowError>;

// headless_chrome reports failures as anyhow errors
impl From<anyhow::Error> for ShadowError {
    fn from(err: anyhow::Error) -> Self {
        ShadowError::DriverExecution(err.to_string())
    }
}

impl From<std::convert::Infallible> for ShadowError {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}
