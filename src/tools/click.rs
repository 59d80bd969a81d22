use crate::error::{Result, ShadowError};
use crate::resolve::{DEFAULT_TIMEOUT, Interaction};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the shadow_click tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShadowClickParams {
    /// Shadow path of the element to click
    pub path: String,

    /// Maximum time to wait, in milliseconds (default: 10000)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Click from script instead of the driver's input pipeline
    /// (default: false)
    #[serde(default)]
    pub force_js: bool,
}

/// Tool for clicking an element behind nested shadow roots
#[derive(Default)]
pub struct ShadowClickTool;

impl Tool for ShadowClickTool {
    type Params = ShadowClickParams;

    fn name(&self) -> &str {
        "shadow_click"
    }

    fn description(&self) -> &str {
        "Locate an element behind nested shadow DOM roots and click it"
    }

    fn execute_typed(&self, params: ShadowClickParams, context: &mut ToolContext) -> Result<ToolResult> {
        let timeout = params
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        let interaction = if params.force_js {
            Interaction::ScriptClick
        } else {
            Interaction::Click
        };

        let resolver = context.session.resolver()?;
        let handle = resolver.find_element_with_timeout(params.path.as_str(), timeout)?;

        resolver
            .interact(&handle, interaction)
            .map_err(|e| ShadowError::ToolExecutionFailed {
                tool: "shadow_click".to_string(),
                reason: e.to_string(),
            })?;

        Ok(ToolResult::success_with(serde_json::json!({
            "path": params.path,
            "force_js": params.force_js,
        })))
    }
}
