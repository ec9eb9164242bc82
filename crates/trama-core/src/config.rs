//! Process configuration.
//!
//! Configuration is built once in `main` and never mutated afterwards.
//! Outbound defaults (base URL, User-Agent) travel inside `UpstreamConfig`
//! and are handed to the fetch client at construction time.

use std::net::SocketAddr;

/// Settings for the upstream feed API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API, without a trailing slash.
    pub base_url: String,
    /// User-Agent attached to every outbound request.
    pub user_agent: String,
}

impl UpstreamConfig {
    /// Create a new upstream configuration.
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            user_agent: user_agent.into(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new("https://api.github.com", "trama-site/0.1")
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening address. Fixed in code, not environment-driven.
    pub bind_addr: SocketAddr,
    /// Upstream feed settings.
    pub upstream: UpstreamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            upstream: UpstreamConfig::default(),
        }
    }
}
