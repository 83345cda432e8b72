//! MCP Server
//!
//! Dispatches JSON-RPC methods onto the tool registry. Transport-agnostic.

use super::protocol::{JsonRpcError, McpRequest, McpResponse};
use super::{PROTOCOL_VERSION, SERVER_VERSION};
use crate::error::ApiError;
use crate::tools::ToolRegistry;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct McpServer {
    name: String,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle one request. Notifications produce no response.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, "Handling MCP request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => McpResponse::success(
                request.id,
                json!({ "tools": self.registry.definitions() }),
            ),
            "tools/call" => self.handle_tools_call(request).await,
            _ => McpResponse::error(request.id, JsonRpcError::method_not_found(&request.method)),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: McpRequest) -> McpResponse {
        let client_name = request
            .params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|ci| ci.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");
        info!(client = %client_name, "Client connected");

        McpResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": self.name,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    async fn handle_tools_call(&self, request: McpRequest) -> McpResponse {
        let params = match &request.params {
            Some(p) => p,
            None => {
                return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing params"))
            }
        };

        let tool_name = match params.get("name").and_then(|n| n.as_str()) {
            Some(n) => n,
            None => {
                return McpResponse::error(
                    request.id,
                    JsonRpcError::invalid_params("Missing tool name"),
                )
            }
        };

        let tool = match self.registry.get(tool_name) {
            Some(tool) => tool,
            None => {
                warn!(tool = %tool_name, "Unknown tool requested");
                return McpResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", tool_name)),
                );
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
        match tool.execute(arguments).await {
            Ok(result) => McpResponse::success(request.id, tool_result(result)),
            Err(e) => {
                warn!(tool = %tool_name, code = e.code(), error = %e, "Tool call failed");
                McpResponse::success(request.id, tool_error(&e))
            }
        }
    }
}

/// Wrap a tool result as MCP content. Strings are passed through as-is.
fn tool_result(result: Value) -> Value {
    let text = match &result {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    };
    let mut body = json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false
    });
    if result.is_object() {
        body["structuredContent"] = result;
    }
    body
}

fn tool_error(error: &ApiError) -> Value {
    json!({
        "content": [{ "type": "text", "text": format!("Error [{}]: {}", error.code(), error) }],
        "structuredContent": {
            "error": { "code": error.code(), "message": error.to_string() }
        },
        "isError": true
    })
}
