//! Fabryk CLI
//!
//! Command-line interface for Fabryk ACL resolution.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use fabryk_cli::cli::{Args, Command};
use fabryk_cli::config::FabrykConfig;
use fabryk_cli::{commands, config_handlers, logging};
use fabryk_core::ConfigManager;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = FabrykConfig::load(args.config.as_deref())?;
    logging::init(&config.log.level, args.verbose);

    let mut stdout = std::io::stdout().lock();

    match args.command {
        Command::Readers { fixture, nodes } => {
            let path = commands::fixture_path(fixture.as_deref(), &config)?;
            tracing::info!(fixture = %path, nodes = nodes.len(), "Resolving readable authorities");
            let store = commands::load_store(path)?;
            let all_ok = commands::run_readers(store, &config.acl, &nodes, &mut stdout).await?;
            if !all_ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Chain { fixture, acl_id } => {
            let path = commands::fixture_path(fixture.as_deref(), &config)?;
            let store = commands::load_store(path)?;
            commands::run_chain(store, acl_id, &mut stdout).await?;
        }
        Command::Config { action } => {
            config_handlers::handle_config_command(args.config.as_deref(), action, &mut stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
