// @awa-component: MCP-ToolCatalog
//
//! Tool catalog — one tool per on-demand scenario of a team.
//!
//! Rebuilt on every `tools/list`: scenarios and their interfaces can change
//! at any time on the Make side.

use std::sync::Arc;

use futures::future::try_join_all;
use rmcp::model::Tool;
use tracing::info;

use make_core::models::{ScenarioInterface, ScenarioSummary};
use make_core::schema::{SchemaFragment, translate_inputs};
use make_core::{MakeError, ScenarioApi};

use super::naming::tool_name;

/// A scenario exposed as a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// Always an `object` schema.
    pub input_schema: SchemaFragment,
}

impl ToolDescriptor {
    pub fn for_scenario(scenario: &ScenarioSummary, interface: &ScenarioInterface) -> Self {
        Self {
            name: tool_name(scenario.id),
            description: tool_description(scenario),
            input_schema: translate_inputs(&interface.input),
        }
    }

    pub fn into_tool(self) -> Tool {
        Tool::new(
            self.name,
            self.description,
            Arc::new(self.input_schema.to_json_object()),
        )
    }
}

/// `<name>` or `<name> (<description>)`.
fn tool_description(scenario: &ScenarioSummary) -> String {
    match scenario.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("{} ({description})", scenario.name)
        }
        _ => scenario.name.clone(),
    }
}

/// Build the tool catalog for a team.
///
/// Only on-demand scenarios are included; scheduled ones run by themselves
/// and are not meant to be invoked. Interfaces are fetched concurrently and
/// any failure aborts the whole build.
pub async fn build_catalog(
    api: &dyn ScenarioApi,
    team_id: u64,
) -> Result<Vec<ToolDescriptor>, MakeError> {
    let scenarios = api.list_scenarios(team_id).await?;
    let total = scenarios.len();

    let descriptors = try_join_all(
        scenarios
            .into_iter()
            .filter(ScenarioSummary::is_on_demand)
            .map(|scenario| async move {
                let interface = api.scenario_interface(scenario.id).await?;
                Ok::<_, MakeError>(ToolDescriptor::for_scenario(&scenario, &interface))
            }),
    )
    .await?;

    info!(
        team_id,
        scenarios = total,
        tools = descriptors.len(),
        "built scenario tool catalog"
    );
    Ok(descriptors)
}
