//! Template structure.
//!
//! Templates are built in code as an ordered list of nodes. There is no
//! parser; page structure lives next to the handlers that use it.

use std::collections::HashMap;

/// String options given at a block invocation site.
pub type Params = HashMap<String, String>;

/// One node of a template.
#[derive(Debug, Clone)]
pub enum Node {
    /// Literal output, emitted as-is.
    Text(String),
    /// Named reference, HTML-escaped on substitution. Missing or null
    /// references render as empty text.
    Var(String),
    /// Named block, resolved against the render context: a sequence value
    /// renders the body once per record, a helper value defers the whole
    /// section.
    Block {
        name: String,
        params: Params,
        body: Template,
    },
}

/// Sub-templates available to a block helper.
#[derive(Debug, Clone)]
pub struct Bodies {
    /// The body to render once per result record.
    pub block: Template,
}

/// An ordered list of nodes making up one page or one block body.
#[derive(Debug, Clone, Default)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Create a template using the builder.
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// Builder for ergonomic template definition.
pub struct TemplateBuilder {
    nodes: Vec<Node>,
}

impl TemplateBuilder {
    /// Create a new template builder.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append literal text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Text(text.into()));
        self
    }

    /// Append an escaped substitution of the named context value.
    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.nodes.push(Node::Var(name.into()));
        self
    }

    /// Append a block with no invocation parameters.
    pub fn block(self, name: impl Into<String>, body: Template) -> Self {
        self.block_with(name, &[], body)
    }

    /// Append a block with invocation parameters.
    pub fn block_with(
        mut self,
        name: impl Into<String>,
        params: &[(&str, &str)],
        body: Template,
    ) -> Self {
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.nodes.push(Node::Block {
            name: name.into(),
            params,
            body,
        });
        self
    }

    /// Build the template.
    pub fn build(self) -> Template {
        Template { nodes: self.nodes }
    }
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
