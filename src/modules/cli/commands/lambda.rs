//! Lambda command implementation

use clap::Args;
use smartpos_core::{Config, Result};
use tracing::info;

use super::mongodb_handler;

/// Lambda command arguments
#[derive(Args, Debug)]
pub struct LambdaCommand {}

impl LambdaCommand {
    /// Execute the lambda command
    pub async fn execute(&self, config: Config) -> Result<()> {
        // Fail the cold start rather than every invocation.
        config.require_url()?;
        info!(database = %config.database, "Database connection opens on first invocation");
        smartpos_runtime::lambda::run(mongodb_handler(config)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartpos_core::SmartPosError;

    #[tokio::test]
    async fn test_lambda_without_url() {
        let result = LambdaCommand {}.execute(Config::default()).await;
        assert!(matches!(result, Err(SmartPosError::Config(_))));
    }
}
