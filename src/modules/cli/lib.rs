//! SmartPOS CLI
//!
//! This crate provides the command-line interface for the SmartPOS API:
//! - serve: Serve the handler over HTTP
//! - invoke: Handle a single gateway event
//! - lambda: Run under the AWS Lambda runtime
//! - ping: Check database connectivity

pub mod commands;

pub use commands::{Cli, Commands, LogFormat};
