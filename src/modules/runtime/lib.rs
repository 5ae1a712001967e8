//! Runtime for the SmartPOS API
//!
//! This crate provides the request handler, the document-store connectors it
//! persists through, the HTTP adapter that serves it locally, and the Lambda
//! entry point.

pub mod connectors;
pub mod handlers;
pub mod lambda;
pub mod server;

pub use connectors::{ConnectionCache, DocumentStore, MemoryStore, MongoStore};
pub use handlers::{ApiHandler, Method, Route};
pub use server::Runtime;
