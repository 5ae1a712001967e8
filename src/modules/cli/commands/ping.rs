//! Ping command implementation

use clap::Args;
use smartpos_core::{Config, Result};
use smartpos_runtime::{ConnectionCache, DocumentStore};
use std::time::Instant;
use tracing::info;

/// Ping command arguments
#[derive(Args, Debug)]
pub struct PingCommand {}

impl PingCommand {
    /// Execute the ping command
    pub async fn execute(&self, config: Config) -> Result<()> {
        let database = config.database.clone();
        let started = Instant::now();

        let store = ConnectionCache::mongodb(config).get().await?;
        store.ping().await?;

        info!(
            backend = store.backend(),
            %database,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Database reachable"
        );
        println!("ok");
        Ok(())
    }
}
