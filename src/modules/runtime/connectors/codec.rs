//! Conversion between request JSON and stored BSON

use bson::{Bson, Document};
use serde_json::{Map, Value};
use smartpos_core::{iso_timestamp, Result, SmartPosError};

/// Render a stored document the way API clients expect to read it
pub fn document_to_json(doc: Document) -> Value {
    let mut map = Map::new();
    for (key, value) in doc {
        map.insert(key, bson_to_json(value));
    }
    Value::Object(map)
}

/// ObjectIds become hex strings and dates ISO-8601 UTC strings with
/// millisecond precision; everything else keeps its natural JSON form.
pub fn bson_to_json(bson: Bson) -> Value {
    match bson {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            chrono::DateTime::from_timestamp_millis(dt.timestamp_millis())
                .map(iso_timestamp)
                .unwrap_or_else(|| dt.to_string()),
        ),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(arr) => Value::Array(arr.into_iter().map(bson_to_json).collect()),
        Bson::Decimal128(d) => Value::String(d.to_string()),
        other => bson::from_bson(other).unwrap_or(Value::Null),
    }
}

/// Convert a JSON object into a document ready for insertion
pub fn json_to_document(map: &Map<String, Value>) -> Result<Document> {
    bson::to_document(map)
        .map_err(|e| SmartPosError::InvalidDocument(format!("JSON to BSON failed: {}", e)))
}

/// Serialize any value into a document (filters, update bodies)
pub fn to_document<T: serde::Serialize>(value: &T) -> Result<Document> {
    bson::to_document(value)
        .map_err(|e| SmartPosError::InvalidDocument(format!("BSON serialization failed: {}", e)))
}
