//! Document stores for the SmartPOS API
//!
//! A MongoDB store for production, an in-memory store with the same update
//! semantics, and the process-wide cache that hands one of them to the handler.

mod cache;
pub mod codec;
mod memory;
mod mongodb;
mod traits;

pub use cache::ConnectionCache;
pub use memory::MemoryStore;
pub use mongodb::MongoStore;
pub use traits::DocumentStore;
