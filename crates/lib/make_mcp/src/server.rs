// @zen-component: MCP-Server
//
//! MCP server handler — exposes Make scenarios as tools.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::Value;

use make_core::{MakeClient, MakeError, ScenarioApi};

use crate::config::ServerConfig;
use crate::tools::{self, DispatchError};

/// Make MCP server handler.
///
/// Holds the scenario API and the team whose scenarios are exposed. Cheap to
/// clone; the HTTP transport creates one per session.
#[derive(Clone)]
pub struct MakeMcpServer {
    api: Arc<dyn ScenarioApi>,
    team_id: u64,
}

impl MakeMcpServer {
    pub fn new(api: Arc<dyn ScenarioApi>, team_id: u64) -> Self {
        Self { api, team_id }
    }

    /// Server backed by the Make HTTP client.
    pub fn from_config(config: &ServerConfig) -> Result<Self, MakeError> {
        let client = MakeClient::new(&config.make)?;
        Ok(Self::new(Arc::new(client), config.team_id))
    }

    pub fn team_id(&self) -> u64 {
        self.team_id
    }

    /// Current tool list for the team.
    pub async fn tools(&self) -> Result<Vec<Tool>, MakeError> {
        let descriptors = tools::build_catalog(self.api.as_ref(), self.team_id).await?;
        Ok(descriptors
            .into_iter()
            .map(tools::ToolDescriptor::into_tool)
            .collect())
    }

    /// Handle a tool call.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult, ErrorData> {
        match tools::dispatch(self.api.as_ref(), name, arguments).await {
            Ok(outcome) => Ok(outcome.into_call_tool_result()),
            Err(err @ DispatchError::UnknownTool(_)) => {
                Err(ErrorData::invalid_params(err.to_string(), None))
            }
        }
    }
}

impl ServerHandler for MakeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Make MCP server — each tool runs an on-demand Make scenario and returns its outputs."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Make".to_string(),
                version: crate::version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        async move {
            let tools = self
                .tools()
                .await
                .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
            Ok(ListToolsResult::with_all_items(tools))
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            self.call(&request.name, request.arguments.map(Value::Object))
                .await
        }
    }
}
