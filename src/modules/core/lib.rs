//! Core domain logic for the SmartPOS API
//!
//! This crate contains configuration loading, the error type shared by every
//! layer, and the transaction and session rules the handler applies.

pub mod config;
pub mod domain;
pub mod error;

pub use config::Config;
pub use domain::*;
pub use error::{Result, SmartPosError};
