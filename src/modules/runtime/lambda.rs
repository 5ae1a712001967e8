//! AWS Lambda entry point
//!
//! Runs the handler under the Lambda runtime API. The API-gateway proxy event
//! deserializes straight into a [`GatewayEvent`]; one [`ApiHandler`], and so
//! one connection cache, serves every invocation of a warm container.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use smartpos_core::{Result, SmartPosError};
use smartpos_types::{GatewayEvent, GatewayResponse};
use std::sync::Arc;
use tracing::{debug, info};

use crate::handlers::ApiHandler;

/// Handle a single Lambda invocation
pub async fn handle_invocation(
    handler: Arc<ApiHandler>,
    event: LambdaEvent<GatewayEvent>,
) -> std::result::Result<GatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    debug!(
        request_id = %context.request_id,
        method = %payload.http_method,
        path = %payload.path,
        "Invocation"
    );
    Ok(handler.handle(payload).await)
}

/// Poll the Lambda runtime API until the container is shut down
pub async fn run(handler: Arc<ApiHandler>) -> Result<()> {
    info!("Starting Lambda runtime");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayEvent>| {
        handle_invocation(handler.clone(), event)
    }))
    .await
    .map_err(|e| SmartPosError::Server(format!("Lambda runtime error: {}", e)))
}
