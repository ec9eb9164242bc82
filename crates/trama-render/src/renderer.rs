//! Template walking and the renderer registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::chunk::DeferredChunk;
use crate::context::{ContextValue, RenderContext};
use crate::error::RenderError;
use crate::escape::escape_html;
use crate::stream::{RenderStream, Segment};
use crate::template::{Bodies, Node, Template};

/// Registry of named templates.
///
/// Build it once at startup; `render` may be called concurrently from any
/// number of requests.
#[derive(Debug, Default)]
pub struct Renderer {
    templates: HashMap<String, Arc<Template>>,
}

impl Renderer {
    /// Create an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under `name`.
    pub fn with_template(mut self, name: impl Into<String>, template: Template) -> Self {
        self.templates.insert(name.into(), Arc::new(template));
        self
    }

    /// Render a registered template against `context`.
    ///
    /// Walks the whole template before returning: static output is
    /// collected into ready segments and every deferred block is spawned
    /// as a task. The returned stream yields the body in document order.
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(
        &self,
        name: &str,
        context: RenderContext,
    ) -> Result<RenderStream, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))?;

        let mut segments = Vec::new();
        let mut buf = String::new();
        walk(template, &context, &mut segments, &mut buf)?;
        flush_text(&mut buf, &mut segments);

        Ok(RenderStream::new(segments))
    }
}

/// Segment-producing walk for top-level templates.
fn walk(
    template: &Template,
    context: &RenderContext,
    segments: &mut Vec<Segment>,
    buf: &mut String,
) -> Result<(), RenderError> {
    for node in template.nodes() {
        match node {
            Node::Text(text) => buf.push_str(text),
            Node::Var(name) => buf.push_str(&escape_html(&context.lookup_text(name))),
            Node::Block { name, params, body } => match context.value(name) {
                Some(ContextValue::Records(records)) => {
                    for record in records {
                        walk(body, &context.push(record.clone()), segments, buf)?;
                    }
                }
                Some(ContextValue::Helper(helper)) => {
                    flush_text(buf, segments);
                    segments.push(defer(name, helper, context, body, params));
                }
                Some(ContextValue::Scalar(_)) => {
                    return Err(RenderError::NotABlock(name.clone()));
                }
                // Absent blocks render nothing, like absent references.
                None => {}
            },
        }
    }
    Ok(())
}

/// Reserve a stream position and spawn the helper as its own task.
fn defer(
    name: &str,
    helper: &Arc<dyn crate::chunk::BlockHelper>,
    context: &RenderContext,
    body: &Template,
    params: &crate::template::Params,
) -> Segment {
    let (tx, rx) = mpsc::unbounded_channel();
    let chunk = DeferredChunk::new(name, tx.clone());
    let bodies = Bodies {
        block: body.clone(),
    };
    let future = helper.invoke(chunk, context.clone(), bodies, params.clone());

    let section = name.to_string();
    debug!(section = %section, "deferred section started");
    tokio::spawn(async move {
        if let Err(err) = future.await {
            debug!(section = %section, error = %err, "deferred section failed");
            let _ = tx.send(Err(err));
        }
    });

    Segment::deferred(name, rx)
}

fn flush_text(buf: &mut String, segments: &mut Vec<Segment>) {
    if !buf.is_empty() {
        segments.push(Segment::ready(std::mem::take(buf)));
    }
}

/// Synchronous walk used inside deferred bodies.
///
/// Sequences still loop; a nested deferred block is rejected because the
/// enclosing section owns its stream position exclusively.
pub(crate) fn render_into(
    template: &Template,
    context: &RenderContext,
    out: &mut String,
) -> Result<(), RenderError> {
    for node in template.nodes() {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(name) => out.push_str(&escape_html(&context.lookup_text(name))),
            Node::Block { name, body, .. } => match context.value(name) {
                Some(ContextValue::Records(records)) => {
                    for record in records {
                        render_into(body, &context.push(record.clone()), out)?;
                    }
                }
                Some(ContextValue::Helper(_)) => {
                    return Err(RenderError::NestedBlock(name.clone()));
                }
                Some(ContextValue::Scalar(_)) => {
                    return Err(RenderError::NotABlock(name.clone()));
                }
                None => {}
            },
        }
    }
    Ok(())
}
