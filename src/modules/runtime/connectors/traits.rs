//! Document store trait definition

use async_trait::async_trait;
use bson::{Bson, Document};
use smartpos_core::Result;
use smartpos_types::Collection;

/// Trait for document stores
///
/// The handler only ever reads whole collections, inserts single documents
/// and applies one `$inc` update, so that is all a backend has to provide.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in the collection
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>>;

    /// Insert a document and return its `_id`
    ///
    /// The backend assigns an ObjectId unless the document already has `_id`.
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<Bson>;

    /// Apply `increments` as an `$inc` to the first document matching `filter`
    ///
    /// # Returns
    /// The number of matched documents (0 or 1). Matching nothing is not an error.
    async fn increment_one(
        &self,
        collection: Collection,
        filter: Document,
        increments: Document,
    ) -> Result<u64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;

    /// Get the backend type name
    fn backend(&self) -> &'static str;
}
