//! MCP tool server driven end to end over a line transport.

use super::support::service_over;
use agent_factory::agent::SledAgentStore;
use agent_factory::mcp::{serve_lines, McpServer};
use agent_factory::tools::ToolRegistry;
use serde_json::{json, Value};
use std::sync::Arc;

fn server_with_tempdir() -> (McpServer, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SledAgentStore::open(&dir.path().join("store")).unwrap());
    let service = Arc::new(service_over(store));
    let server = McpServer::new("AgentFactory", Arc::new(ToolRegistry::for_factory(service)));
    (server, dir)
}

async fn exchange(server: &McpServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();
    serve_lines(input.as_bytes(), &mut output, server)
        .await
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

#[tokio::test]
async fn handshake_and_tool_table() {
    let (server, _dir) = server_with_tempdir();
    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "clientInfo": {"name": "test-client", "version": "0.0.1"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "AgentFactory");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "create_new_agent",
            "list_agents",
            "get_agent_code",
            "list_agent_templates",
            "create_agent_from_template"
        ]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[tokio::test]
async fn create_list_fetch_and_duplicate() {
    let (server, _dir) = server_with_tempdir();
    let crm = json!({
        "name": "crm_specialist",
        "role": "assistant",
        "system_message": "Manage customer contacts"
    });
    let responses = exchange(
        &server,
        &[
            call(1, "create_new_agent", crm.clone()),
            call(2, "list_agents", json!({})),
            call(3, "get_agent_code", json!({"name": "crm_specialist"})),
            call(4, "create_new_agent", crm),
            call(5, "get_agent_code", json!({"name": "missing"})),
        ],
    )
    .await;
    assert_eq!(responses.len(), 5);

    let created = &responses[0]["result"];
    assert_eq!(created["isError"], false);
    assert_eq!(created["structuredContent"]["name"], "crm_specialist");

    let listed = &responses[1]["result"]["structuredContent"];
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["agents"][0]["name"], "crm_specialist");

    let code = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(code.contains("Manage customer contacts"));
    assert_eq!(
        created["structuredContent"]["generated_code"].as_str().unwrap(),
        code
    );

    let duplicate = &responses[3]["result"];
    assert_eq!(duplicate["isError"], true);
    assert_eq!(duplicate["structuredContent"]["error"]["code"], "duplicate_name");

    let missing = &responses[4]["result"];
    assert_eq!(missing["isError"], true);
    assert_eq!(missing["structuredContent"]["error"]["code"], "not_found");
}

#[tokio::test]
async fn protocol_errors() {
    let (server, _dir) = server_with_tempdir();
    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "prompts/list"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call"}),
            call(3, "drop_all_agents", json!({})),
        ],
    )
    .await;
    assert_eq!(responses[0]["error"]["code"], -32601);
    assert_eq!(responses[1]["error"]["code"], -32602);
    assert_eq!(responses[2]["error"]["code"], -32602);
}
