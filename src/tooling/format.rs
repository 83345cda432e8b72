//! Format agents, templates and stats as text.

use crate::agent::{AgentDefinition, AgentStats, AgentSummary, AgentTemplate};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn join_or_dash<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let joined = items.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

pub fn format_agent_list_text(agents: &[AgentSummary]) -> String {
    if agents.is_empty() {
        return "No agents found.".to_string();
    }
    let mut out = format!("{}\n\n", format_section_heading("Agents"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Role", "Capabilities", "Model", "Created", "Code"]);
    for agent in agents {
        table.add_row(vec![
            agent.name.clone(),
            agent.role.to_string(),
            join_or_dash(agent.capabilities.iter().map(String::as_str)),
            agent.model.clone(),
            agent.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            if agent.has_code { "yes" } else { "no" }.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\nTotal: {} agent(s)", table, agents.len()));
    out
}

pub fn format_agent_show_text(agent: &AgentDefinition) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&format!("Agent: {}", agent.name)));
    out.push_str(&format!("  Role: {}\n", agent.role));
    out.push_str(&format!("  Model: {} ({})\n", agent.model, agent.provider));
    out.push_str(&format!(
        "  Capabilities: {}\n",
        join_or_dash(agent.capabilities.iter().map(String::as_str))
    ));
    out.push_str(&format!("  Created: {}\n", agent.created_at.to_rfc3339()));
    out.push_str(&format!(
        "  Code: {}\n",
        if agent.generated_code.is_some() { "generated" } else { "none" }
    ));
    if !agent.metadata.is_empty() {
        out.push_str("  Metadata:\n");
        for (key, value) in &agent.metadata {
            out.push_str(&format!("    {}: {}\n", key, value));
        }
    }
    out.push_str(&format!(
        "\n{}\n\n{}\n",
        format_section_heading("System message"),
        agent.system_message
    ));
    out
}

/// Confirmation printed after a create or template apply.
pub fn format_created_text(agent: &AgentDefinition) -> String {
    format!(
        "Created agent '{}' ({}, {})\nRun `agent-factory agent code {}` to print its code.",
        agent.name, agent.role, agent.model, agent.name
    )
}

pub fn format_stats_text(stats: &AgentStats) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Agent Stats"));
    out.push_str(&format!("  Total: {}\n", stats.total));
    out.push_str(&format!("  Created in the last 7 days: {}\n", stats.recent));
    if stats.by_role.is_empty() {
        return out;
    }
    out.push('\n');
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Role", "Agents"]);
    for row in &stats.by_role {
        table.add_row(vec![row.role.to_string(), row.count.to_string()]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_templates_text(templates: &[AgentTemplate]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Agent Templates"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Template", "Role", "Capabilities", "Description"]);
    for template in templates {
        table.add_row(vec![
            template.name.to_string(),
            template.role.to_string(),
            join_or_dash(template.capabilities.iter().copied()),
            template.description.to_string(),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{templates::builtin_templates, AgentRole, RoleCount};
    use chrono::Utc;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_agent_list_text(&[]), "No agents found.");
    }

    #[test]
    fn test_list_table_has_rows() {
        let agents = vec![AgentSummary {
            name: "crm_specialist".to_string(),
            role: AgentRole::Assistant,
            capabilities: vec![],
            model: "llama-3.3-70b-versatile".to_string(),
            created_at: Utc::now(),
            has_code: true,
        }];
        let text = format_agent_list_text(&agents);
        assert!(text.contains("crm_specialist"));
        assert!(text.contains("assistant"));
        assert!(text.contains("Total: 1 agent(s)"));
    }

    #[test]
    fn test_stats_and_templates() {
        let stats = AgentStats {
            total: 2,
            by_role: vec![RoleCount {
                role: AgentRole::Coder,
                count: 2,
            }],
            recent: 2,
        };
        let text = format_stats_text(&stats);
        assert!(text.contains("Total: 2"));
        assert!(text.contains("coder"));

        let text = format_templates_text(builtin_templates());
        assert!(text.contains("code_specialist"));
        assert!(text.contains("research_analyst"));
    }
}
