//! Streaming template primitives with deferred sections.
//!
//! This crate renders named templates into an ordered byte stream:
//! - `Template` / `TemplateBuilder` - Page structure as a node list
//! - `RenderContext` / `ContextValue` - Per-request name bindings
//! - `BlockHelper` / `DeferredChunk` - Sections filled in asynchronously
//! - `Renderer` / `RenderStream` - Document-ordered response body
//!
//! Static content flushes as soon as the stream is polled. A block whose
//! context value is a helper reserves its position in the stream and runs
//! as its own task; everything after it is held back until the section
//! signals completion, so the final body always reads in document order.

mod chunk;
mod context;
mod error;
mod escape;
mod renderer;
mod stream;
mod template;

pub use chunk::*;
pub use context::*;
pub use error::*;
pub use escape::*;
pub use renderer::*;
pub use stream::*;
pub use template::*;
