//! Gateway request handler

use bson::Document;
use chrono::Utc;
use serde_json::Value;
use smartpos_core::{
    iso_timestamp, stamp_transaction, Result, SessionIncrement, ACTIVE_SESSION_FIELD,
};
use smartpos_types::{
    Collection, DataResponse, GatewayEvent, GatewayResponse, HealthResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::router::{Method, Route};
use crate::connectors::codec::{bson_to_json, document_to_json, json_to_document, to_document};
use crate::connectors::{ConnectionCache, DocumentStore};

/// Handles gateway events against a cached document store
pub struct ApiHandler {
    connections: Arc<ConnectionCache>,
}

impl ApiHandler {
    pub fn new(connections: Arc<ConnectionCache>) -> Self {
        Self { connections }
    }

    /// Handle one event. Never fails: errors become a `500` response.
    pub async fn handle(&self, event: GatewayEvent) -> GatewayResponse {
        if event.http_method.parse::<Method>() == Ok(Method::Options) {
            debug!(path = %event.path, "CORS preflight");
            return GatewayResponse::preflight();
        }

        match self.dispatch(&event).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    method = %event.http_method,
                    path = %event.path,
                    database = e.is_database_error(),
                    "Request failed: {}",
                    e
                );
                GatewayResponse::internal_error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, event: &GatewayEvent) -> Result<GatewayResponse> {
        // Every non-preflight request needs the connection, even health and 404s.
        let store = self.connections.get().await?;

        let Some(route) = Route::resolve(&event.http_method, &event.path) else {
            debug!(method = %event.http_method, path = %event.path, "No route");
            return Ok(GatewayResponse::not_found());
        };
        debug!(?route, "Dispatching");

        match route {
            Route::Health => Ok(GatewayResponse::json(
                200,
                &HealthResponse::healthy(iso_timestamp(Utc::now())),
            )?),
            Route::List(collection) => list(store.as_ref(), collection).await,
            Route::CreateTransaction => {
                create_transaction(store.as_ref(), event.body.as_deref()).await
            }
        }
    }
}

async fn list(store: &dyn DocumentStore, collection: Collection) -> Result<GatewayResponse> {
    let documents = store.find_all(collection).await?;
    debug!(%collection, count = documents.len(), "Listed documents");

    let data: Vec<Value> = documents.into_iter().map(document_to_json).collect();
    Ok(GatewayResponse::json(200, &DataResponse::success(data))?)
}

/// Insert the stamped transaction, then bump the active session.
///
/// The two writes are independent: if the session update fails the inserted
/// transaction stays and the request still fails as a whole.
async fn create_transaction(
    store: &dyn DocumentStore,
    body: Option<&str>,
) -> Result<GatewayResponse> {
    let mut transaction = stamp_transaction(body, Utc::now())?;
    let increment = SessionIncrement::for_transaction(&transaction);

    let inserted_id = store
        .insert_one(Collection::Transactions, json_to_document(&transaction)?)
        .await?;
    info!(id = ?transaction.get("id"), "Recorded transaction");

    if !increment.has_numeric_amount() {
        warn!(total_sales = %increment.total_sales, "Transaction amount is not numeric");
    }
    let mut active = Document::new();
    active.insert(ACTIVE_SESSION_FIELD, true);
    let matched = store
        .increment_one(Collection::Sessions, active, to_document(&increment)?)
        .await?;
    if matched == 0 {
        warn!("No active session to credit");
    }

    transaction.insert("_id".to_string(), bson_to_json(inserted_id));
    Ok(GatewayResponse::json(200, &DataResponse::success(transaction))?)
}
