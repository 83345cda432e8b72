//! Agent code generation.
//!
//! Pure template expansion: a template is selected by role and `{{key}}`
//! placeholders are substituted in a single pass. Nothing here runs or checks the
//! produced source; that belongs to whatever runtime picks it up.

use crate::agent::domain::AgentRole;
use crate::config::ModelConfig;
use std::collections::{BTreeMap, BTreeSet};

const HEADER: &str = r#"# Agent: {{name}}
# Role: {{role}}
# Created by Agent Factory

import os

from autogen_core.models import ChatCompletionClient
from autogen_agentchat.agents import AssistantAgent
"#;

const MODEL_CLIENT: &str = r#"
model_client = ChatCompletionClient.load_component(
    {
        "provider": "{{provider}}",
        "config": {
            "model": "{{model}}",
            "api_key": os.getenv("{{api_key_env}}"),
        },
    }
)
"#;

const ASSISTANT_BODY: &str = r#"
{{ident}} = AssistantAgent(
    name="{{name}}",
    model_client=model_client,
    system_message="""
{{system_message}}

Your capabilities: {{capabilities}}
""",
    description="Assistant agent created by Agent Factory",
)
"#;

const CODER_IMPORTS: &str = r#"from autogen_agentchat.agents import CodeExecutorAgent
from autogen_ext.code_executors.local import LocalCommandLineCodeExecutor
"#;

const CODER_BODY: &str = r#"
{{ident}} = AssistantAgent(
    name="{{name}}",
    model_client=model_client,
    system_message="""
{{system_message}}

Your capabilities: {{capabilities}}

Write complete code blocks. A separate executor agent runs them and reports the output.
""",
    description="Coding agent created by Agent Factory",
)

{{ident}}_executor = CodeExecutorAgent(
    name="{{name}}_executor",
    code_executor=LocalCommandLineCodeExecutor(work_dir="coding/{{name}}"),
)
"#;

const RESEARCHER_BODY: &str = r#"
{{ident}} = AssistantAgent(
    name="{{name}}",
    model_client=model_client,
    system_message="""
{{system_message}}

Your capabilities: {{capabilities}}

Cite the sources behind every finding.
""",
    description="Research agent created by Agent Factory",
    reflect_on_tool_use=True,
)
"#;

const FOOTER: &str = r#"
agent_metadata = {
    "name": "{{name}}",
    "role": "{{role}}",
    "capabilities": {{capability_list}},
    "model": "{{model}}",
    "created_by": "agent_factory",
}

__all__ = [{{exports}}, "agent_metadata"]
"#;

/// Inputs to code generation.
#[derive(Debug, Clone, Copy)]
pub struct CodeSpec<'a> {
    pub name: &'a str,
    pub role: AgentRole,
    pub system_message: &'a str,
    pub capabilities: &'a BTreeSet<String>,
    pub model: &'a ModelConfig,
}

/// Full template text for a role, before substitution.
pub fn template_for(role: AgentRole) -> String {
    let (imports, body) = match role {
        AgentRole::Assistant => ("", ASSISTANT_BODY),
        AgentRole::Coder => (CODER_IMPORTS, CODER_BODY),
        AgentRole::Researcher => ("", RESEARCHER_BODY),
    };
    [HEADER, imports, MODEL_CLIENT, body, FOOTER].concat()
}

/// Render the source text for an agent.
pub fn render_agent_code(spec: &CodeSpec<'_>) -> String {
    let ident = runtime_identifier(spec.name);
    let exports = match spec.role {
        AgentRole::Coder => format!("\"{}\", \"{}_executor\"", ident, ident),
        _ => format!("\"{}\"", ident),
    };
    let capabilities = if spec.capabilities.is_empty() {
        "general assistance".to_string()
    } else {
        spec.capabilities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let capability_list = format!(
        "[{}]",
        spec.capabilities
            .iter()
            .map(|c| format!("\"{}\"", escape_string_literal(c)))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    values.insert("name", spec.name.to_string());
    values.insert("ident", ident);
    values.insert("role", spec.role.as_str().to_string());
    values.insert("system_message", escape_block_literal(spec.system_message));
    values.insert("capabilities", escape_block_literal(&capabilities));
    values.insert("capability_list", capability_list);
    values.insert("model", escape_string_literal(&spec.model.model));
    values.insert("provider", escape_string_literal(&spec.model.provider));
    values.insert("api_key_env", escape_string_literal(&spec.model.api_key_env));
    values.insert("exports", exports);

    expand(&template_for(spec.role), |key| values.get(key).map(String::as_str))
}

/// Substitute `{{key}}` placeholders left to right.
///
/// Substituted values are never rescanned. Unknown keys and unterminated
/// openers are copied through unchanged.
pub fn expand<'v>(template: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(key.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Placeholder keys referenced by a template.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                keys.insert(after[..end].trim().to_string());
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    keys
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Module-level names the templates bind themselves.
const TEMPLATE_BINDINGS: &[&str] = &[
    "os",
    "model_client",
    "agent_metadata",
    "AssistantAgent",
    "CodeExecutorAgent",
    "ChatCompletionClient",
    "LocalCommandLineCodeExecutor",
];

/// Agent name as a runtime identifier.
pub fn runtime_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if PYTHON_KEYWORDS.contains(&ident.as_str()) || TEMPLATE_BINDINGS.contains(&ident.as_str()) {
        ident.push_str("_agent");
    }
    ident
}

/// Escape text placed inside a triple-quoted literal.
fn escape_block_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape text placed inside a single-line double-quoted literal.
fn escape_string_literal(text: &str) -> String {
    escape_block_literal(text)
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
