//! Serve command implementation

use clap::Args;
use smartpos_core::{Config, Result, SmartPosError};
use smartpos_runtime::Runtime;
use std::net::SocketAddr;
use tracing::info;

use super::mongodb_handler;

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8888)]
    pub port: u16,
}

impl ServeCommand {
    /// Execute the serve command
    pub async fn execute(&self, config: Config) -> Result<()> {
        let addr = self.addr()?;
        info!(database = %config.database, "Database connection opens on first request");

        let runtime = Runtime::new(mongodb_handler(config), addr);
        runtime.run().await
    }

    fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SmartPosError::Server(format!("Invalid address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_addr() {
        let cmd = ServeCommand {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(
            cmd.addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_serve_invalid_host() {
        let cmd = ServeCommand {
            host: "not a host".to_string(),
            port: 3000,
        };
        assert!(matches!(cmd.addr(), Err(SmartPosError::Server(_))));
    }
}
