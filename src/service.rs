use chrono::Local;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::json;
use std::sync::Arc;

use crate::cities::available_cities;
use crate::constants::SERVER_NAME;
use crate::dispatcher::{DispatchError, Dispatcher, ToolOutput};

impl From<DispatchError> for McpError {
    fn from(error: DispatchError) -> Self {
        let message = error.to_string();
        match error {
            DispatchError::UnknownTool(name) => {
                McpError::invalid_params(message, Some(json!({ "tool": name })))
            }
            DispatchError::MissingParameter { tool, parameter } => McpError::invalid_params(
                message,
                Some(json!({ "tool": tool, "parameter": parameter })),
            ),
            DispatchError::InvalidParameter { tool, .. } => {
                McpError::invalid_params(message, Some(json!({ "tool": tool })))
            }
            DispatchError::Encoding(_) => McpError::internal_error(message, None),
        }
    }
}

/// MCP server exposing the mock weather tools
#[derive(Clone)]
pub struct WeatherServer {
    dispatcher: Arc<Dispatcher>,
}

impl WeatherServer {
    /// Creates a server with the fixed tool catalog
    pub fn new() -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new()),
        }
    }

    /// Runs one invocation with a fresh thread-local random source
    fn dispatch(&self, request: &CallToolRequestParam) -> Result<ToolOutput, DispatchError> {
        let arguments = request.arguments.clone().unwrap_or_default();
        let mut rng = rand::thread_rng();
        self.dispatcher
            .call_tool(&request.name, &arguments, Local::now(), &mut rng)
    }
}

impl Default for WeatherServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(format!(
                "A mock weather service providing current conditions, forecasts and alerts. \
                Available cities: {}",
                available_cities()
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.dispatcher.list_tools().map(Into::into).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Calling tool: {}", request.name);

        match self.dispatch(&request) {
            Ok(output) => {
                if output.is_rejected() {
                    tracing::warn!(
                        "Correctable input for {}: {}",
                        request.name,
                        output.text().lines().next().unwrap_or_default()
                    );
                }
                Ok(CallToolResult::success(vec![Content::text(
                    output.into_text(),
                )]))
            }
            Err(error) => {
                tracing::warn!("Rejected call to {}: {}", request.name, error);
                Err(error.into())
            }
        }
    }
}
