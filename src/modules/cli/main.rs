//! SmartPOS CLI
//!
//! Command-line interface for the SmartPOS API handler.

use anyhow::Context;
use clap::Parser;
use smartpos_cli::{Cli, Commands, LogFormat};
use smartpos_core::Config;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    // stdout is reserved for command output
    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    let config = Config::from_env().context("failed to load configuration")?;

    // Execute command
    match cli.command {
        Commands::Serve(cmd) => {
            cmd.execute(config).await.context("server failed")?;
        }
        Commands::Invoke(cmd) => {
            cmd.execute(config).await.context("invocation failed")?;
        }
        Commands::Lambda(cmd) => {
            cmd.execute(config).await.context("lambda runtime failed")?;
        }
        Commands::Ping(cmd) => {
            cmd.execute(config).await.context("database ping failed")?;
        }
    }

    Ok(())
}
