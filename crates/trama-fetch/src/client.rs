//! HTTP fetch client.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use trama_core::UpstreamConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Building the underlying HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network-layer failure reaching the upstream.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Response body was not the expected JSON shape.
    #[error("invalid upstream payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of raw upstream response bodies.
///
/// Production code uses [`FetchClient`]; tests substitute stub sources to
/// simulate delays, failures and canned payloads.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Fetch the raw response body for `url`.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Outbound HTTP client.
///
/// Wraps one `reqwest::Client` carrying the configured User-Agent on every
/// request. Constructed once at startup from an immutable
/// [`UpstreamConfig`]; no per-call mutation. No retries and no timeout
/// beyond the transport's defaults.
pub struct FetchClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl FetchClient {
    /// Create a new fetch client.
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

#[async_trait]
impl JsonSource for FetchClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "outbound GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

/// Parse an upstream listing body into its records, in upstream order.
///
/// Anything that is not a JSON array is a [`FetchError::Parse`].
pub fn parse_records(body: &str) -> Result<Vec<Value>, FetchError> {
    Ok(serde_json::from_str::<Vec<Value>>(body)?)
}
