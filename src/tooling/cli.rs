//! CLI Tooling
//!
//! Command-line interface for the agent factory: local agent management plus
//! the MCP stdio server.

use crate::agent::{
    open_store, AgentFactoryService, AgentRole, CreateAgentRequest, TemplateCustomizations,
};
use crate::config::{ConfigLoader, FactoryConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::mcp::{McpServer, StdioTransport};
use crate::tooling::format::{
    format_agent_list_text, format_agent_show_text, format_created_text, format_stats_text,
    format_templates_text,
};
use crate::tools::ToolRegistry;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Agent Factory CLI - create agent definitions and serve them as MCP tools
#[derive(Parser)]
#[command(name = "agent-factory")]
#[command(about = "Create AI agent definitions with generated code, exposed as MCP tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of configured logging.
    ///
    /// `--log-file` is not folded in; it goes to `init_logging` as the top source.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the factory tools over MCP on stdin/stdout
    Serve,
    /// Agent commands (create, list, show, code, stats)
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Template commands (list, apply)
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Print the published tool table as JSON
    Tools,
}

impl Commands {
    pub fn is_serve(&self) -> bool {
        matches!(self, Commands::Serve)
    }
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Create a new agent and generate its code
    Create {
        /// Unique agent name
        #[arg(long)]
        name: String,
        /// Agent role (assistant, coder, researcher)
        #[arg(long)]
        role: String,
        /// Instructions defining the agent's behavior
        #[arg(long)]
        system_message: String,
        /// Capability tag (repeatable)
        #[arg(long = "capability")]
        capabilities: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List all agents, oldest first
    List {
        /// Filter by role
        #[arg(long)]
        role: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show agent details
    Show {
        /// Agent name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print an agent's generated code
    Code {
        /// Agent name
        name: String,
    },
    /// Show counts by role and recent activity
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List built-in templates
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create an agent from a template
    Apply {
        /// Template name
        template: String,
        /// Name for the new agent
        name: String,
        /// Replace the template's instructions
        #[arg(long)]
        system_message: Option<String>,
        /// Override the template's role
        #[arg(long)]
        role: Option<String>,
        /// Extra capability tag (repeatable)
        #[arg(long = "capability")]
        capabilities: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context: configuration, the shared factory service and the tool table.
pub struct CliContext {
    config: FactoryConfig,
    service: Arc<AgentFactoryService>,
    registry: Arc<ToolRegistry>,
}

impl CliContext {
    /// Load configuration and open the configured store.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ApiError> {
        Self::from_config(load_config(config_path)?)
    }

    pub fn from_config(config: FactoryConfig) -> Result<Self, ApiError> {
        let store = open_store(&config.storage)?;
        let service = Arc::new(AgentFactoryService::new(store, config.model.clone()));
        let registry = Arc::new(ToolRegistry::for_factory(service.clone()));
        Ok(Self {
            config,
            service,
            registry,
        })
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<AgentFactoryService> {
        &self.service
    }

    /// Execute a command and return its output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Serve => self.handle_serve(),
            Commands::Agent { command } => self.handle_agent_command(command),
            Commands::Template { command } => self.handle_template_command(command),
            Commands::Tools => to_pretty_json(&self.registry.definitions()),
        }
    }

    fn handle_serve(&self) -> Result<String, ApiError> {
        let server = McpServer::new(self.config.server.name.clone(), self.registry.clone());
        info!(
            server = %server.name(),
            tools = self.registry.len(),
            backend = self.service.store().backend_name(),
            "Serving agent factory tools on stdio"
        );
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::TransportError(format!("Failed to start runtime: {}", e)))?;
        runtime
            .block_on(StdioTransport::new().serve(&server))
            .map_err(|e| ApiError::TransportError(e.to_string()))?;
        Ok(String::new())
    }

    fn handle_agent_command(&self, command: &AgentCommands) -> Result<String, ApiError> {
        match command {
            AgentCommands::Create {
                name,
                role,
                system_message,
                capabilities,
                format,
            } => {
                let request = CreateAgentRequest::new(name, role, system_message)
                    .with_capabilities(capabilities.iter().cloned());
                let agent = self.service.create_agent(request)?;
                match format.as_str() {
                    "json" => to_pretty_json(&agent),
                    _ => Ok(format_created_text(&agent)),
                }
            }
            AgentCommands::List { role, format } => {
                let role_filter = role.as_deref().map(str::parse::<AgentRole>).transpose()?;
                let agents: Vec<_> = self
                    .service
                    .list_agents()?
                    .into_iter()
                    .filter(|a| role_filter.map_or(true, |r| a.role == r))
                    .collect();
                match format.as_str() {
                    "json" => to_pretty_json(&json!({ "total": agents.len(), "agents": agents })),
                    _ => Ok(format_agent_list_text(&agents)),
                }
            }
            AgentCommands::Show { name, format } => {
                let agent = self.service.get_agent(name)?;
                match format.as_str() {
                    "json" => to_pretty_json(&agent),
                    _ => Ok(format_agent_show_text(&agent)),
                }
            }
            AgentCommands::Code { name } => self.service.agent_code(name),
            AgentCommands::Stats { format } => {
                let stats = self.service.stats()?;
                match format.as_str() {
                    "json" => to_pretty_json(&stats),
                    _ => Ok(format_stats_text(&stats)),
                }
            }
        }
    }

    fn handle_template_command(&self, command: &TemplateCommands) -> Result<String, ApiError> {
        match command {
            TemplateCommands::List { format } => {
                let templates = self.service.templates();
                match format.as_str() {
                    "json" => to_pretty_json(&json!({ "templates": templates })),
                    _ => Ok(format_templates_text(templates)),
                }
            }
            TemplateCommands::Apply {
                template,
                name,
                system_message,
                role,
                capabilities,
                format,
            } => {
                let customizations = TemplateCustomizations {
                    system_message: system_message.clone(),
                    role: role.clone(),
                    capabilities: capabilities.clone(),
                    ..Default::default()
                };
                let agent = self
                    .service
                    .create_from_template(template, name, customizations)?;
                match format.as_str() {
                    "json" => to_pretty_json(&agent),
                    _ => Ok(format_created_text(&agent)),
                }
            }
        }
    }
}

/// Load layered configuration, with an explicit file when given.
pub fn load_config(config_path: Option<&Path>) -> Result<FactoryConfig, ApiError> {
    match config_path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidRequest(format!("Failed to render JSON: {}", e)))
}
