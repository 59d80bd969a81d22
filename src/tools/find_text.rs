use crate::error::Result;
use crate::resolve::DEFAULT_TIMEOUT;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the find_shadow_text tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindShadowTextParams {
    /// Text the target element must contain (literal substring match)
    pub text: String,

    /// Maximum time to wait, in milliseconds (default: 10000)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Tool for locating a leaf element by its rendered text, across every
/// nested shadow subtree
#[derive(Default)]
pub struct FindShadowTextTool;

impl Tool for FindShadowTextTool {
    type Params = FindShadowTextParams;

    fn name(&self) -> &str {
        "find_shadow_text"
    }

    fn description(&self) -> &str {
        "Locate the first leaf element whose text contains the given string, scanning all nested shadow DOM roots"
    }

    fn execute_typed(
        &self,
        params: FindShadowTextParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let timeout = params
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        let handle = context
            .session
            .find_shadow_text_with_timeout(&params.text, timeout)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "text": params.text,
            "object_id": handle.object_id(),
            "description": handle.description(),
        })))
    }
}
