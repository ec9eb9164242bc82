//! Outbound fetch client with fixed defaults.
//!
//! This crate provides:
//! - `FetchClient` - One shared HTTP client, configured once
//! - `JsonSource` - Seam for substituting the upstream in tests
//! - `parse_records` - Upstream listing body into ordered records

mod client;

pub use client::*;
