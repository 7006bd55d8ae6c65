//! Id-addressed element store the alternatives widget renders into.
//!
//! The widget never holds on to element references: every operation looks
//! up what it needs by id, so a document that changes between calls is seen
//! as it is now.

use std::collections::HashMap;

use super::WidgetError;
use super::template::{AlternativeEntry, Fragment, FragmentNode};

/// Container holding the rendered alternatives.
pub const FORM_ID: &str = "alternatives_form";
/// Reusable fragment cloned once per alternative.
pub const TEMPLATE_ID: &str = "alternatives_template";
/// Prompt text shown above the alternatives.
pub const WORDING_ID: &str = "alternatives_wording";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Container(Vec<AlternativeEntry>),
    Template(Fragment),
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Container(_) => "container",
            Node::Template(_) => "template",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: HashMap<String, Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout served by the alternatives panel: an empty prompt, an
    /// empty form and the input/label/span template.
    pub fn alternatives() -> Self {
        let mut doc = Self::new();
        doc.insert(WORDING_ID, Node::Text(String::new()));
        doc.insert(FORM_ID, Node::Container(Vec::new()));
        doc.insert(
            TEMPLATE_ID,
            Node::Template(Fragment::new(vec![
                FragmentNode::Input,
                FragmentNode::Label,
                FragmentNode::Span,
            ])),
        );
        doc
    }

    pub fn insert(&mut self, id: impl Into<String>, node: Node) -> Option<Node> {
        self.nodes.insert(id.into(), node)
    }

    #[cfg(test)]
    pub(crate) fn remove(&mut self, id: &str) -> Option<Node> {
        self.nodes.remove(id)
    }

    fn get(&self, id: &str) -> Result<&Node, WidgetError> {
        self.nodes.get(id).ok_or_else(|| WidgetError::MissingElement {
            id: id.to_string(),
        })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Node, WidgetError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| WidgetError::MissingElement { id: id.to_string() })
    }

    pub fn text(&self, id: &str) -> Result<&str, WidgetError> {
        match self.get(id)? {
            Node::Text(text) => Ok(text),
            other => Err(WidgetError::wrong_element(id, "text", other.kind())),
        }
    }

    pub fn set_text(&mut self, id: &str, value: impl Into<String>) -> Result<(), WidgetError> {
        match self.get_mut(id)? {
            Node::Text(text) => {
                *text = value.into();
                Ok(())
            }
            other => Err(WidgetError::wrong_element(id, "text", other.kind())),
        }
    }

    pub fn container(&self, id: &str) -> Result<&[AlternativeEntry], WidgetError> {
        match self.get(id)? {
            Node::Container(entries) => Ok(entries),
            other => Err(WidgetError::wrong_element(id, "container", other.kind())),
        }
    }

    pub fn container_mut(&mut self, id: &str) -> Result<&mut Vec<AlternativeEntry>, WidgetError> {
        match self.get_mut(id)? {
            Node::Container(entries) => Ok(entries),
            other => Err(WidgetError::wrong_element(id, "container", other.kind())),
        }
    }

    pub fn template(&self, id: &str) -> Result<&Fragment, WidgetError> {
        match self.get(id)? {
            Node::Template(fragment) => Ok(fragment),
            other => Err(WidgetError::wrong_element(id, "template", other.kind())),
        }
    }
}
