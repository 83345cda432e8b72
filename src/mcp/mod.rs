//! MCP Tool Server
//!
//! Serves the factory tool table over the Model Context Protocol
//! (JSON-RPC 2.0, newline-delimited on stdio).

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, McpRequest, McpResponse};
pub use server::McpServer;
pub use transport::{serve_lines, McpHandler, StdioTransport};

/// Protocol revision advertised on `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Crate version reported as the server version.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
