//! Application state and routing.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::{info_span, Instrument};

use trama_core::{RequestId, ServerConfig};
use trama_fetch::FetchClient;
use trama_render::{BlockHelper, Renderer};

use crate::error::SiteError;
use crate::gists::GistFeed;
use crate::{pages, templates};

/// Shared per-process state. Immutable after construction.
pub struct AppState {
    pub renderer: Renderer,
    pub gists: Arc<dyn BlockHelper>,
}

impl AppState {
    /// Build the production state from `config`.
    pub fn shared(config: &ServerConfig) -> Result<Arc<Self>, SiteError> {
        let client = FetchClient::new(config.upstream.clone())?;
        let base_url = config.upstream.base_url.clone();
        Ok(Arc::new(Self {
            renderer: templates::renderer(),
            gists: Arc::new(GistFeed::new(Arc::new(client), base_url)),
        }))
    }
}

/// Route table: two exact matches, everything else lands on the rendered
/// 404 page, including known paths hit with the wrong method.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/contato", get(pages::contato))
        .fallback(pages::not_found)
        .method_not_allowed_fallback(pages::not_found)
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Tags every request with a generated id, as a tracing span field and an
/// `x-request-id` response header.
async fn request_id(request: Request, next: Next) -> Response {
    let id = RequestId::generate();
    let span = info_span!(
        "request",
        id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
