//! Shadow lookup tools
//!
//! Wraps the resolution engine in named operations with JSON parameters
//! and JSON results, so external callers (agent frameworks, scripting
//! layers) can drive lookups without touching the typed API. Each tool
//! declares a typed parameter struct with a derived JSON schema.

pub mod click;
pub mod find;
pub mod find_text;

pub use click::{ShadowClickParams, ShadowClickTool};
pub use find::{FindShadowParams, FindShadowTool};
pub use find_text::{FindShadowTextParams, FindShadowTextTool};

use crate::browser::BrowserSession;
use crate::error::{Result, ShadowError};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool completed successfully
    pub success: bool,

    /// Tool-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// A successful result without payload
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// A successful result carrying a payload
    pub fn success_with(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed result carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Execution context handed to tools
pub struct ToolContext<'a> {
    /// The session the tool operates on
    pub session: &'a BrowserSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }
}

/// A named browser operation with typed parameters
pub trait Tool {
    /// Parameter type, deserialized from the raw JSON input
    type Params: DeserializeOwned + JsonSchema;

    /// Unique tool name used for registry dispatch
    fn name(&self) -> &str;

    /// Short human-readable description
    fn description(&self) -> &str;

    /// Execute with already-deserialized parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema of the parameter type
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    /// Deserialize raw parameters and execute
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed = serde_json::from_value(params)?;
        self.execute_typed(typed, context)
    }
}

/// Object-safe view of a [`Tool`] for registry storage
trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> serde_json::Value;
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool + Send + Sync> ErasedTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Registry of available tools, preserving registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Registry pre-loaded with the shadow lookup tools
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(FindShadowTool);
        registry.register(FindShadowTextTool);
        registry.register(ShadowClickTool);
        registry
    }

    /// Register a tool under its own name
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + Send + Sync + 'static,
    {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    /// Execute a registered tool by name
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ShadowError::UnknownTool(name.to_string()))?;
        tool.execute(params, context)
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Name, description and parameter schema of every registered tool
    pub fn descriptors(&self) -> Vec<serde_json::Value> {
        self.tools
            .values()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.parameters_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
