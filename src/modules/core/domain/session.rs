//! Session running totals

use serde::Serialize;
use serde_json::{Map, Value};

use super::transaction::TOTAL_AMOUNT_FIELD;

/// Boolean flag marking the session that receives sales
pub const ACTIVE_SESSION_FIELD: &str = "is_active";

/// Increments applied to the active session after a sale.
///
/// Field names match the session document so this serializes directly into
/// the body of an `$inc` update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionIncrement {
    /// The transaction's `total_amount`, forwarded as-is (null when absent)
    pub total_sales: Value,
    pub transaction_count: i32,
}

impl SessionIncrement {
    pub fn for_transaction(transaction: &Map<String, Value>) -> Self {
        Self {
            total_sales: transaction
                .get(TOTAL_AMOUNT_FIELD)
                .cloned()
                .unwrap_or(Value::Null),
            transaction_count: 1,
        }
    }

    /// True when the amount is something a numeric increment can accept
    pub fn has_numeric_amount(&self) -> bool {
        self.total_sales.is_number()
    }
}
