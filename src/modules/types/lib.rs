//! Type definitions for the SmartPOS API
//!
//! Shared wire types: the gateway event/response pair the handler speaks,
//! the JSON envelopes it returns, and the collections it reads and writes.

pub mod collection;
pub mod event;
pub mod runtime;

pub use collection::Collection;
pub use event::{GatewayEvent, GatewayResponse};
pub use runtime::{DataResponse, ErrorResponse, HealthResponse};
