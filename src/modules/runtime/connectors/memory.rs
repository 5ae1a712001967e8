//! In-memory document store
//!
//! Follows MongoDB's rules for the subset the handler uses: equality filters,
//! insertion order for reads and first-match for updates, and `$inc` with the
//! server's numeric widening.

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use smartpos_core::{Result, SmartPosError};
use smartpos_types::Collection;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::DocumentStore;

/// Document store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add documents without going through `insert_one`; `_id` is left as given
    pub async fn seed(&self, collection: Collection, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().extend(documents);
    }

    /// Snapshot a collection
    pub async fn documents(&self, collection: Collection) -> Vec<Document> {
        let collections = self.collections.read().await;
        collections.get(&collection).cloned().unwrap_or_default()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// `current + delta` under MongoDB's `$inc` type rules
fn add(field: &str, current: Option<&Bson>, delta: &Bson) -> Result<Bson> {
    let non_numeric = |what: &str| {
        SmartPosError::Store(format!(
            "Cannot increment {} with non-numeric {}",
            field, what
        ))
    };

    if !is_numeric(delta) {
        return Err(non_numeric("argument"));
    }

    let current = match current {
        None => return Ok(delta.clone()),
        Some(value) if is_numeric(value) => value,
        Some(_) => return Err(non_numeric("field value")),
    };

    Ok(match (current, delta) {
        (Bson::Int32(a), Bson::Int32(b)) => a
            .checked_add(*b)
            .map(Bson::Int32)
            .unwrap_or_else(|| Bson::Int64(i64::from(*a) + i64::from(*b))),
        (Bson::Double(_), _) | (_, Bson::Double(_)) => {
            Bson::Double(as_f64(current) + as_f64(delta))
        }
        _ => as_i64(current)
            .checked_add(as_i64(delta))
            .map(Bson::Int64)
            .ok_or_else(|| {
                SmartPosError::Store(format!(
                    "Failed to apply $inc to {}: integer overflow",
                    field
                ))
            })?,
    })
}

fn is_numeric(value: &Bson) -> bool {
    matches!(value, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_))
}

fn as_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(v) => f64::from(*v),
        Bson::Int64(v) => *v as f64,
        Bson::Double(v) => *v,
        _ => 0.0,
    }
}

fn as_i64(value: &Bson) -> i64 {
    match value {
        Bson::Int32(v) => i64::from(*v),
        Bson::Int64(v) => *v,
        _ => 0,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        Ok(self.documents(collection).await)
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(SmartPosError::Store(format!(
                "duplicate key in {}: _id {}",
                collection, id
            )));
        }
        documents.push(document);
        Ok(id)
    }

    async fn increment_one(
        &self,
        collection: Collection,
        filter: Document,
        increments: Document,
    ) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(0);
        };

        // Validate every field before touching the document so a failed
        // update leaves it unchanged.
        let updated = increments
            .iter()
            .map(|(field, delta)| Ok((field.clone(), add(field, document.get(field), delta)?)))
            .collect::<Result<Vec<_>>>()?;
        for (field, value) in updated {
            document.insert(field, value);
        }
        Ok(1)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
