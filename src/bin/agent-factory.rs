//! Agent Factory CLI Binary

use anyhow::Context;
use agent_factory::logging::init_logging;
use agent_factory::tooling::cli::{load_config, Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_deref()).context("Error loading configuration")?;
    init_logging(
        Some(&cli.logging_config(&config.logging)),
        cli.log_file.clone(),
        cli.command.is_serve(),
    )
    .context("Error initializing logging")?;

    let context = CliContext::from_config(config).context("Error opening agent store")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
