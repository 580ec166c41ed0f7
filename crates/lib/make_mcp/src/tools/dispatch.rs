// @awa-component: MCP-ToolDispatch
//
//! Tool dispatch — run the scenario behind a `run_scenario_<id>` tool.
//!
//! Arguments are forwarded untouched; Make validates them and reports
//! problems as sub-errors, which end up in the tool result text.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use make_core::ScenarioApi;

use super::naming::parse_tool_name;

/// Text returned when a run succeeds without outputs.
pub const SUCCESS_MESSAGE: &str = "Scenario executed successfully.";

/// Calls that cannot be dispatched at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The name was not produced by the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Text result of a dispatched call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub is_error: bool,
    pub text: String,
}

impl ToolOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            text: text.into(),
        }
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Run the scenario named by `tool_name`.
///
/// Scenario failures are returned as an error outcome; only a name outside
/// the `run_scenario_<id>` grammar fails the call itself.
pub async fn dispatch(
    api: &dyn ScenarioApi,
    tool_name: &str,
    arguments: Option<Value>,
) -> Result<ToolOutcome, DispatchError> {
    let scenario_id =
        parse_tool_name(tool_name).ok_or_else(|| DispatchError::UnknownTool(tool_name.to_string()))?;

    info!(scenario_id, "running scenario");
    let outcome = match api.run_scenario(scenario_id, arguments).await {
        Ok(run) => {
            info!(scenario_id, execution_id = %run.execution_id, "scenario finished");
            ToolOutcome::success(render_outputs(run.outputs))
        }
        Err(err) => {
            warn!(scenario_id, "scenario run failed: {err}");
            ToolOutcome::error(err.to_string())
        }
    };
    Ok(outcome)
}

fn render_outputs(outputs: Option<Value>) -> String {
    match outputs {
        Some(outputs) if !outputs.is_null() => {
            serde_json::to_string_pretty(&outputs).unwrap_or_else(|_| outputs.to_string())
        }
        _ => SUCCESS_MESSAGE.to_string(),
    }
}
