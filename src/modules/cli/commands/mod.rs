//! CLI commands

mod invoke;
mod lambda;
mod ping;
mod serve;

pub use invoke::InvokeCommand;
pub use lambda::LambdaCommand;
pub use ping::PingCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand, ValueEnum};
use smartpos_core::Config;
use smartpos_runtime::{ApiHandler, ConnectionCache};
use std::sync::Arc;

/// SmartPOS API - point-of-sale backend handler
#[derive(Parser, Debug)]
#[command(name = "smartpos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log line formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the handler over HTTP
    Serve(ServeCommand),

    /// Handle one gateway event and print the response
    Invoke(InvokeCommand),

    /// Run under the AWS Lambda runtime
    Lambda(LambdaCommand),

    /// Connect to the database and run a ping
    Ping(PingCommand),
}

/// Handler backed by a lazily connected MongoDB store
pub(crate) fn mongodb_handler(config: Config) -> Arc<ApiHandler> {
    Arc::new(ApiHandler::new(Arc::new(ConnectionCache::mongodb(config))))
}
