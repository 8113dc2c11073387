//! Node types: NodeId, NodeKind, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    ///
    /// Keys are versioned: an id is never handed out again after its node
    /// is removed, so a stale id simply stops resolving.
    pub struct NodeId;
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a lowercase tag name (`div`, `button`).
    Element(String),
    /// A plain text node.
    Text(String),
    /// A raw markup fragment injected verbatim (the `innerHTML` path).
    Markup(String),
}

/// Data associated with a single document node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Classes, in insertion order.
    pub classes: Vec<String>,
    /// Attributes other than `class` and `style`.
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations, in insertion order.
    styles: Vec<(String, String)>,
}

impl NodeData {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: Vec::new(),
        }
    }

    /// Create an element node.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element(tag.into().to_ascii_lowercase()))
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(text.into()))
    }

    /// Create a raw markup node.
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Markup(markup.into()))
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style declaration (builder).
    pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    /// The tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Set an inline style declaration. An existing declaration keeps its
    /// position and has its value replaced.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.styles.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((property.to_owned(), value)),
        }
    }

    /// Read an inline style declaration.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// All inline style declarations, in insertion order.
    pub fn styles(&self) -> &[(String, String)] {
        &self.styles
    }
}
