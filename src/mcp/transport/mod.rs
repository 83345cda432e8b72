//! Transport Layer

mod stdio;

pub use stdio::{serve_lines, StdioTransport};

use super::protocol::{McpRequest, McpResponse};
use async_trait::async_trait;

/// Request handler driven by a transport.
#[async_trait]
pub trait McpHandler: Send + Sync {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse>;
}

#[async_trait]
impl McpHandler for super::McpServer {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        super::McpServer::handle_request(self, request).await
    }
}
