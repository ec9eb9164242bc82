//! Error types for rendering.

use thiserror::Error;

/// Errors that can occur while rendering a template.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No template registered under the requested name.
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    /// A block node resolved to a scalar context value.
    #[error("`{0}` is not a block value")]
    NotABlock(String),

    /// A required block parameter was absent at the invocation site.
    #[error("missing block parameter `{0}`")]
    MissingParam(String),

    /// Deferred blocks cannot nest inside a deferred body.
    #[error("deferred block `{0}` inside a deferred body")]
    NestedBlock(String),

    /// A deferred section went away without signaling completion.
    #[error("section `{0}` ended without completing")]
    Incomplete(String),

    /// Failure surfaced by a block helper.
    #[error("block `{name}` failed: {source}")]
    Helper {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RenderError {
    /// Wrap a helper failure with the name of the block that produced it.
    pub fn helper(
        name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Helper {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
