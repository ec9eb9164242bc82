//! Render context: per-request name bindings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::chunk::BlockHelper;

/// A value bound to a name in a render context.
///
/// Resolution is by pattern match: the renderer never probes values for
/// capabilities at runtime.
#[derive(Clone)]
pub enum ContextValue {
    /// A literal, substituted where a template references its name.
    Scalar(Value),
    /// An ordered sequence of records, rendered once per record.
    Records(Vec<Value>),
    /// A block helper that fills its section asynchronously.
    Helper(Arc<dyn BlockHelper>),
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Records(r) => f.debug_tuple("Records").field(&r.len()).finish(),
            Self::Helper(_) => f.debug_tuple("Helper").finish(),
        }
    }
}

/// Name bindings for one render call.
///
/// A context is a root mapping plus a stack of record frames. Rendering a
/// record pushes one frame; the frame is visible only inside the block it
/// was pushed for. Cloning is cheap, the root map is shared.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    root: Arc<HashMap<String, ContextValue>>,
    frames: Vec<Arc<Value>>,
}

impl RenderContext {
    /// An empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a context using the builder.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Child context with `record` as the innermost frame.
    pub fn push(&self, record: Value) -> Self {
        let mut frames = self.frames.clone();
        frames.push(Arc::new(record));
        Self {
            root: Arc::clone(&self.root),
            frames,
        }
    }

    /// Look up a root binding by name.
    pub fn value(&self, name: &str) -> Option<&ContextValue> {
        self.root.get(name)
    }

    /// Resolve a reference for substitution.
    ///
    /// Record frames win over root bindings, innermost first. Missing
    /// names and JSON nulls resolve to empty text.
    pub fn lookup_text(&self, name: &str) -> String {
        for frame in self.frames.iter().rev() {
            if let Value::Object(fields) = frame.as_ref() {
                if let Some(v) = fields.get(name) {
                    return scalar_text(v);
                }
            }
        }
        match self.root.get(name) {
            Some(ContextValue::Scalar(v)) => scalar_text(v),
            _ => String::new(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builder for ergonomic context definition.
#[derive(Default)]
pub struct ContextBuilder {
    entries: HashMap<String, ContextValue>,
}

impl ContextBuilder {
    /// Create a new context builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a scalar value.
    pub fn scalar(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Scalar(value.into()));
        self
    }

    /// Bind an ordered sequence of records.
    pub fn records(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Records(records));
        self
    }

    /// Bind a block helper.
    pub fn helper(mut self, name: impl Into<String>, helper: Arc<dyn BlockHelper>) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Helper(helper));
        self
    }

    /// Build the context.
    pub fn build(self) -> RenderContext {
        RenderContext {
            root: Arc::new(self.entries),
            frames: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pushed_frame_shadows_root_scalar() {
        let ctx = RenderContext::builder().scalar("name", "root").build();
        let child = ctx.push(json!({"name": "frame"}));

        assert_eq!(ctx.lookup_text("name"), "root");
        assert_eq!(child.lookup_text("name"), "frame");
    }

    #[test]
    fn inner_frame_wins_over_outer() {
        let ctx = RenderContext::empty()
            .push(json!({"id": 1}))
            .push(json!({"id": 2}));
        assert_eq!(ctx.lookup_text("id"), "2");
    }

    #[test]
    fn frame_is_scoped_to_its_context_value() {
        let ctx = RenderContext::empty();
        let child = ctx.push(json!({"id": 7}));

        assert_eq!(child.lookup_text("id"), "7");
        // The parent is untouched by the push.
        assert_eq!(ctx.lookup_text("id"), "");
    }

    #[test]
    fn missing_and_null_resolve_to_empty() {
        let ctx = RenderContext::empty().push(json!({"description": null}));
        assert_eq!(ctx.lookup_text("description"), "");
        assert_eq!(ctx.lookup_text("nope"), "");
    }

    #[test]
    fn numbers_render_as_plain_text() {
        let ctx = RenderContext::empty().push(json!({"id": 42}));
        assert_eq!(ctx.lookup_text("id"), "42");
    }
}
