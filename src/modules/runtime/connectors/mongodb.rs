//! MongoDB document store

use async_trait::async_trait;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Database};
use smartpos_core::{Config, Result, SmartPosError};
use smartpos_types::Collection;
use tracing::info;

use super::traits::DocumentStore;

const APP_NAME: &str = "smartpos-api";

/// MongoDB store bound to a single database
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect using the configured URL and confirm the deployment answers a ping
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config.require_url()?;

        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| SmartPosError::MongoDB(format!("MongoDB options parse failed: {}", e)))?;
        options.min_pool_size = config.min_pool_size.or(options.min_pool_size).or(Some(1));
        options.max_pool_size = config.max_pool_size.or(options.max_pool_size).or(Some(10));
        options.app_name = options.app_name.or_else(|| Some(APP_NAME.to_string()));

        let client = Client::with_options(options).map_err(|e| {
            SmartPosError::MongoDB(format!("MongoDB client creation failed: {}", e))
        })?;
        let database = client.database(&config.database);

        let store = Self { client, database };
        // The driver connects lazily; surface an unreachable server now.
        store.ping().await?;

        info!(database = %config.database, "Connected to MongoDB");
        Ok(store)
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(None, None)
            .await
            .map_err(|e| SmartPosError::MongoDB(format!("find on {} failed: {}", collection, e)))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| SmartPosError::MongoDB(format!("cursor on {} failed: {}", collection, e)))
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<Bson> {
        let result = self
            .collection(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                SmartPosError::MongoDB(format!("insert into {} failed: {}", collection, e))
            })?;
        Ok(result.inserted_id)
    }

    async fn increment_one(
        &self,
        collection: Collection,
        filter: Document,
        increments: Document,
    ) -> Result<u64> {
        let result = self
            .collection(collection)
            .update_one(filter, bson::doc! { "$inc": increments }, None)
            .await
            .map_err(|e| {
                SmartPosError::MongoDB(format!("update on {} failed: {}", collection, e))
            })?;
        Ok(result.matched_count)
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(bson::doc! { "ping": 1 }, None)
            .await
            .map_err(|e| SmartPosError::MongoDB(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
