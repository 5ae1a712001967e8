//! Domain rules for point-of-sale writes

mod session;
mod transaction;

pub use session::{SessionIncrement, ACTIVE_SESSION_FIELD};
pub use transaction::{iso_timestamp, stamp_transaction, transaction_id, TOTAL_AMOUNT_FIELD};
