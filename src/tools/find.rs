use crate::error::Result;
use crate::resolve::DEFAULT_TIMEOUT;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the find_shadow tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindShadowParams {
    /// Shadow path, e.g. "user-profile > settings-card > button.save"
    pub path: String,

    /// Maximum time to wait, in milliseconds (default: 10000)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Tool for locating an element behind nested shadow roots
#[derive(Default)]
pub struct FindShadowTool;

impl Tool for FindShadowTool {
    type Params = FindShadowParams;

    fn name(&self) -> &str {
        "find_shadow"
    }

    fn description(&self) -> &str {
        "Locate an element behind nested shadow DOM roots using a '>'-delimited selector path"
    }

    fn execute_typed(&self, params: FindShadowParams, context: &mut ToolContext) -> Result<ToolResult> {
        let timeout = params
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        let handle = context
            .session
            .find_shadow_with_timeout(params.path.as_str(), timeout)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "path": params.path,
            "object_id": handle.object_id(),
            "description": handle.description(),
        })))
    }
}
