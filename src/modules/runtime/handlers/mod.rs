//! Request handling for the SmartPOS API
//!
//! The route table and the handler that turns gateway events into responses.

mod api;
mod router;

pub use api::ApiHandler;
pub use router::{Method, Route, ROUTES};
