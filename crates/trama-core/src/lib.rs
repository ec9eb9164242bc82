//! Core types for the trama streaming page toolkit.
//!
//! This crate provides the shared foundation:
//! - `RequestId` - Unique request identifier for correlation
//! - `ServerConfig` / `UpstreamConfig` - Immutable process configuration

mod config;
mod context;

pub use config::*;
pub use context::*;
