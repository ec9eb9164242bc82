//! Application error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use trama_fetch::FetchError;
use trama_render::RenderError;

/// Failures that surface before a response body starts streaming.
///
/// Failures inside an already-streaming body cannot change the status
/// line anymore; those truncate the body instead (transport default).
#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("response construction: {0}")]
    Http(#[from] axum::http::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}
