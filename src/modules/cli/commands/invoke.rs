//! Invoke command implementation

use clap::Args;
use smartpos_core::{Config, Result};
use smartpos_runtime::ApiHandler;
use smartpos_types::{GatewayEvent, GatewayResponse};
use tokio::io::AsyncReadExt;
use tracing::info;

use super::mongodb_handler;

/// Invoke command arguments
#[derive(Args, Debug)]
pub struct InvokeCommand {
    /// Gateway event JSON file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

impl InvokeCommand {
    /// Execute the invoke command, printing the gateway response to stdout
    pub async fn execute(&self, config: Config) -> Result<()> {
        let raw = self.read_event().await?;
        let handler = mongodb_handler(config);

        let response = invoke(&handler, &raw).await?;
        info!(status = response.status_code, "Invocation finished");

        let output = if self.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{}", output);
        Ok(())
    }

    async fn read_event(&self) -> Result<String> {
        if self.event == "-" {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        } else {
            Ok(tokio::fs::read_to_string(&self.event).await?)
        }
    }
}

/// Decode one event and run it through the handler.
///
/// Only an undecodable event is an error here; everything after that is
/// reported inside the response, exactly as the gateway would see it.
pub async fn invoke(handler: &ApiHandler, raw: &str) -> Result<GatewayResponse> {
    let event: GatewayEvent = serde_json::from_str(raw)?;
    Ok(handler.handle(event).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartpos_core::SmartPosError;
    use smartpos_runtime::{ConnectionCache, MemoryStore};
    use std::sync::Arc;

    fn memory_handler() -> ApiHandler {
        ApiHandler::new(Arc::new(ConnectionCache::with_store(Arc::new(
            MemoryStore::new(),
        ))))
    }

    #[tokio::test]
    async fn test_invoke_event() {
        let handler = memory_handler();
        let response = tokio_test::assert_ok!(
            invoke(&handler, r#"{"httpMethod": "GET", "path": "/api/items"}"#).await
        );
        assert_eq!(response.status_code, 200);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&response.body).unwrap(),
            serde_json::json!({ "success": true, "data": [] })
        );
    }

    #[tokio::test]
    async fn test_invoke_rejects_undecodable_event() {
        let handler = memory_handler();
        let result = invoke(&handler, r#"{"path": "/api/items"}"#).await;
        assert!(matches!(result, Err(SmartPosError::Json(_))));
    }

    #[tokio::test]
    async fn test_read_event_from_missing_file() {
        let cmd = InvokeCommand {
            event: "/nonexistent/smartpos-event.json".to_string(),
            pretty: false,
        };
        assert!(matches!(cmd.read_event().await, Err(SmartPosError::Io(_))));
    }
}
