//! Deferred sections.
//!
//! A block helper receives a `DeferredChunk`: the writing half of the
//! stream position the renderer reserved for its section. The helper runs
//! as its own task, appends rendered output in order, and signals
//! completion with [`DeferredChunk::end`]. A chunk that goes away without
//! `end()` fails the section.

use bytes::Bytes;
use futures::future::BoxFuture;
use tokio::sync::mpsc;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::renderer::render_into;
use crate::template::{Bodies, Params, Template};

/// Messages flowing from a section task into the body stream.
#[derive(Debug)]
pub(crate) enum ChunkMsg {
    /// Rendered output, appended at the section's position.
    Data(Bytes),
    /// End-of-section: the stream may move past this position.
    End,
}

pub(crate) type ChunkSender = mpsc::UnboundedSender<Result<ChunkMsg, RenderError>>;
pub(crate) type ChunkReceiver = mpsc::UnboundedReceiver<Result<ChunkMsg, RenderError>>;

/// Handle to a reserved position in the output stream.
pub struct DeferredChunk {
    name: String,
    tx: ChunkSender,
}

impl DeferredChunk {
    pub(crate) fn new(name: impl Into<String>, tx: ChunkSender) -> Self {
        Self {
            name: name.into(),
            tx,
        }
    }

    /// Name of the block this chunk belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append literal text to the section.
    pub fn write(&self, text: impl AsRef<str>) {
        let bytes = Bytes::copy_from_slice(text.as_ref().as_bytes());
        let _ = self.tx.send(Ok(ChunkMsg::Data(bytes)));
    }

    /// Render a sub-template into the section.
    ///
    /// Rendering here is synchronous; a nested deferred block fails with
    /// [`RenderError::NestedBlock`].
    pub fn render(&self, template: &Template, context: &RenderContext) -> Result<(), RenderError> {
        let mut out = String::new();
        render_into(template, context, &mut out)?;
        self.write(out);
        Ok(())
    }

    /// Signal end-of-section so the stream can proceed past it.
    pub fn end(self) {
        let _ = self.tx.send(Ok(ChunkMsg::End));
    }
}

/// A named, template-invocable block that fills its section asynchronously.
///
/// The returned future is spawned as its own task; the renderer does not
/// wait for it before continuing template traversal. Returning an error
/// puts the section into its failed state, which terminates the body
/// stream at the section's position.
pub trait BlockHelper: Send + Sync {
    /// Fill `chunk` with the section's output.
    fn invoke(
        &self,
        chunk: DeferredChunk,
        context: RenderContext,
        bodies: Bodies,
        params: Params,
    ) -> BoxFuture<'static, Result<(), RenderError>>;
}
