//! Transaction stamping

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::{Result, SmartPosError};

/// Caller-supplied amount that feeds the active session's running total
pub const TOTAL_AMOUNT_FIELD: &str = "total_amount";

/// `txn_<epoch milliseconds>`. Two transactions in the same millisecond collide.
pub fn transaction_id(now: DateTime<Utc>) -> String {
    format!("txn_{}", now.timestamp_millis())
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a raw request body and assign the server-side `id` and `timestamp`.
///
/// The body must be a JSON object; any caller-supplied `id` or `timestamp`
/// is overwritten. Nothing else is validated, `total_amount` included.
pub fn stamp_transaction(body: Option<&str>, now: DateTime<Utc>) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(body.unwrap_or_default())?;
    let mut document = match value {
        Value::Object(map) => map,
        other => {
            return Err(SmartPosError::InvalidDocument(format!(
                "transaction body must be a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    document.insert("id".to_string(), Value::String(transaction_id(now)));
    document.insert("timestamp".to_string(), Value::String(iso_timestamp(now)));
    Ok(document)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn test_transaction_id() {
        assert_eq!(transaction_id(fixed_now()), "txn_1700000000123");
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(fixed_now()), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_stamp_keeps_caller_fields() {
        let doc = stamp_transaction(Some(r#"{"total_amount": 42.5, "item": "cola"}"#), fixed_now())
            .unwrap();
        assert_eq!(doc["total_amount"], json!(42.5));
        assert_eq!(doc["item"], json!("cola"));
        assert_eq!(doc["id"], json!("txn_1700000000123"));
        assert_eq!(doc["timestamp"], json!("2023-11-14T22:13:20.123Z"));
    }

    #[test]
    fn test_stamp_overwrites_caller_id() {
        let doc = stamp_transaction(Some(r#"{"id": "mine", "timestamp": "yesterday"}"#), fixed_now())
            .unwrap();
        assert_eq!(doc["id"], json!("txn_1700000000123"));
        assert_eq!(doc["timestamp"], json!("2023-11-14T22:13:20.123Z"));
    }

    #[test]
    fn test_stamp_malformed_json() {
        let err = stamp_transaction(Some("{\"total_amount\": "), fixed_now()).unwrap_err();
        assert!(matches!(err, SmartPosError::Json(_)));
    }

    #[test]
    fn test_stamp_missing_body() {
        let err = stamp_transaction(None, fixed_now()).unwrap_err();
        assert!(matches!(err, SmartPosError::Json(_)));
    }

    #[test]
    fn test_stamp_rejects_non_object() {
        let err = stamp_transaction(Some("[1, 2]"), fixed_now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid document: transaction body must be a JSON object, got an array"
        );
    }
}
