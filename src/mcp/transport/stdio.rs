//! Stdio Transport
//!
//! Newline-delimited JSON-RPC over stdin/stdout.

use super::McpHandler;
use crate::mcp::protocol::{JsonRpcError, McpRequest, McpResponse};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

#[derive(Debug, Default)]
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Serve until stdin closes.
    pub async fn serve<H: McpHandler>(self, handler: &H) -> io::Result<()> {
        info!("Starting MCP stdio transport");
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        serve_lines(stdin, stdout, handler).await?;
        info!("Stdio transport shutting down");
        Ok(())
    }
}

/// Read one request per line from `reader`, write one response per line to `writer`.
pub async fn serve_lines<R, W, H>(mut reader: R, mut writer: W, handler: &H) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    H: McpHandler + ?Sized,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(request = %line, "Received request");
                match serde_json::from_str::<McpRequest>(line) {
                    Ok(request) => handler.handle_request(request).await,
                    Err(e) => {
                        error!(error = %e, "Parse error");
                        Some(McpResponse::error(None, JsonRpcError::parse_error(e.to_string())))
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "Request line is not UTF-8");
                Some(McpResponse::error(None, JsonRpcError::parse_error(e.to_string())))
            }
        };

        let Some(response) = response else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;
        debug!(response = %response_json, "Sending response");

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
