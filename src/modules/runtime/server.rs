//! Local HTTP server for the SmartPOS handler
//!
//! Serves the gateway handler over HTTP: every request, whatever its method
//! or path, becomes a [`GatewayEvent`] and the [`GatewayResponse`] is written
//! back verbatim. Routing, CORS and errors all stay in the handler.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use smartpos_core::{Result, SmartPosError};
use smartpos_types::{GatewayEvent, GatewayResponse};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::handlers::{ApiHandler, ROUTES};

/// Largest request body read into an event; matches the Lambda payload limit.
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Runtime server for the SmartPOS API
pub struct Runtime {
    handler: Arc<ApiHandler>,
    addr: SocketAddr,
}

impl Runtime {
    pub fn new(handler: Arc<ApiHandler>, addr: SocketAddr) -> Self {
        Self { handler, addr }
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        // Request timeout
        let timeout = TimeoutLayer::new(Duration::from_secs(30));

        Router::new()
            .fallback(Self::forward)
            .with_state(self.handler.clone())
            .layer(timeout)
            .layer(TraceLayer::new_for_http())
    }

    async fn forward(
        State(handler): State<Arc<ApiHandler>>,
        method: Method,
        uri: Uri,
        body: Body,
    ) -> Response {
        // Read the body here rather than through a typed extractor so that
        // oversized or non-UTF-8 bodies still get the handler's error envelope.
        let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%method, path = uri.path(), "Failed to read request body: {}", e);
                return into_response(GatewayResponse::internal_error(format!(
                    "Failed to read request body: {}",
                    e
                )));
            }
        };

        let body = String::from_utf8_lossy(&bytes).into_owned();
        let event = to_event(&method, &uri, body);
        into_response(handler.handle(event).await)
    }

    /// Start the server
    pub async fn run(&self) -> Result<()> {
        let app = self.build_router();

        info!("Starting SmartPOS API on http://{}", self.addr);
        for (method, path, _) in ROUTES {
            debug!("Route: {} {}", method, path);
        }

        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|e| SmartPosError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| SmartPosError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for CTRL+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }
}

/// Gateway events carry the bare path; the query string is dropped.
fn to_event(method: &Method, uri: &Uri, body: String) -> GatewayEvent {
    let event = GatewayEvent::new(method.as_str(), uri.path());
    if body.is_empty() {
        event
    } else {
        event.with_body(body)
    }
}

fn into_response(gateway: GatewayResponse) -> Response {
    let status =
        StatusCode::from_u16(gateway.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Body::from(gateway.body)).into_response();

    let headers = response.headers_mut();
    for (name, value) in gateway.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "Dropping invalid response header"),
        }
    }
    response
}
