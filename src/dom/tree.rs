//! Document tree: create, attach, remove, mutate, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::markup;
use super::node::{NodeData, NodeId, NodeKind};
use crate::event::handler::{ClickHandler, EventDispatcher};
use crate::event::message::Envelope;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// A freshly created node is detached; it becomes visible once it is appended
/// somewhere under [`body`](Self::body).
///
/// Every mutator tolerates ids of removed nodes and reports `false`/`None`
/// instead of panicking.
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    body: NodeId,
    click_handlers: SecondaryMap<NodeId, ClickHandler>,
    events: EventDispatcher,
}

impl Document {
    /// Create a document holding only an empty `<body>`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData::element("body"));
        let mut children = SecondaryMap::new();
        children.insert(body, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            body,
            click_handlers: SecondaryMap::new(),
            events: EventDispatcher::new(),
        }
    }

    /// The `<body>` node. Never removed.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached node.
    pub fn create_element(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_element(NodeData::text(text))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// Returns `false` (and changes nothing) if either node is missing or the
    /// move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        if child == parent || self.ancestors(parent).contains(&child) {
            return false;
        }
        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
        true
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist. The body cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if id == self.body || !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.click_handlers.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Remove every child subtree of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let kids = self.children(id).to_vec();
        for kid in kids {
            self.remove(kid);
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(old_parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != id);
            }
        }
    }

    /// Whether `id` is reachable from the body.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        id == self.body || self.ancestors(id).last() == Some(&self.body)
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Empty if the node has none or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` upward, collecting ancestors (nearest first, `id` excluded).
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the arena, attached or not, body included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but the body.
    pub fn is_empty(&self) -> bool {
        self.children(self.body).is_empty() && self.nodes.len() == 1
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // ── Content ─────────────────────────────────────────────────────

    /// Replace the children of `id` with a single text node (`innerText`).
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        self.replace_content(id, NodeData::text(text), text.is_empty())
    }

    /// Replace the children of `id` with a raw markup fragment (`innerHTML`).
    pub fn set_inner_markup(&mut self, id: NodeId, markup: &str) -> bool {
        self.replace_content(id, NodeData::markup(markup), markup.is_empty())
    }

    fn replace_content(&mut self, id: NodeId, content: NodeData, empty: bool) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.clear_children(id);
        if !empty {
            let node = self.create_element(content);
            self.append_child(id, node);
        }
        true
    }

    /// Concatenated text of `id` and its descendants. Markup fragments
    /// contribute their text, without tags.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.walk_depth_first(id) {
            match self.nodes.get(node).map(|d| &d.kind) {
                Some(NodeKind::Text(text)) => out.push_str(text),
                Some(NodeKind::Markup(raw)) => out.push_str(&markup::visible_text(raw)),
                _ => {}
            }
        }
        out
    }

    // ── Style and attributes ────────────────────────────────────────

    /// Set an inline style declaration. `false` if the node is gone.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(data) => {
                data.set_style(property, value);
                true
            }
            None => false,
        }
    }

    /// Read an inline style declaration.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|d| d.style(property))
    }

    /// Set an attribute. `false` if the node is gone.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(data) => {
                data.attributes.insert(name.to_owned(), value.into());
                true
            }
            None => false,
        }
    }

    /// Read an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|d| d.attributes.get(name))
            .map(String::as_str)
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Install the click listener for `id`, replacing any previous one.
    pub fn on_click(&mut self, id: NodeId, handler: ClickHandler) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.click_handlers.insert(id, handler);
        true
    }

    /// The click listener for `id`, if any.
    pub fn click_handler(&self, id: NodeId) -> Option<ClickHandler> {
        self.click_handlers.get(id).cloned()
    }

    /// Queue a custom event. The queue is bounded, see [`EventDispatcher`].
    pub fn dispatch(&mut self, envelope: Envelope) {
        self.events.push(envelope);
    }

    /// Drain queued custom events.
    pub fn drain_events(&mut self) -> Vec<Envelope> {
        self.events.drain()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::app::App;

    /// ```text
    ///      body
    ///      /  \
    ///     a    b
    ///    / \
    ///   c   d
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element(NodeData::element("div").with_class("a"));
        let b = doc.create_element(NodeData::element("div").with_class("b"));
        let c = doc.create_element(NodeData::element("button").with_class("c"));
        let d = doc.create_element(NodeData::element("span").with_class("d"));
        doc.append_child(body, a);
        doc.append_child(body, b);
        doc.append_child(a, c);
        doc.append_child(a, d);
        (doc, body, a, b, c, d)
    }

    #[test]
    fn new_document_has_only_body() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.get(doc.body()).and_then(|d| d.tag()), Some("body"));
    }

    #[test]
    fn created_nodes_start_detached() {
        let mut doc = Document::new();
        let div = doc.create_element(NodeData::element("div"));
        assert!(doc.contains(div));
        assert!(!doc.is_attached(div));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn append_child_relationships() {
        let (doc, body, a, b, c, d) = build_tree();
        assert_eq!(doc.children(body), &[a, b]);
        assert_eq!(doc.children(a), &[c, d]);
        assert_eq!(doc.parent(c), Some(a));
        assert_eq!(doc.ancestors(c), vec![a, body]);
        assert!(doc.is_attached(c));
    }

    #[test]
    fn append_child_moves_between_parents() {
        let (mut doc, _, a, b, c, _) = build_tree();
        assert!(doc.append_child(b, c));
        assert!(!doc.children(a).contains(&c));
        assert_eq!(doc.children(b), &[c]);
    }

    #[test]
    fn append_child_rejects_cycles() {
        let (mut doc, _, a, _, c, _) = build_tree();
        assert!(!doc.append_child(c, a));
        assert!(!doc.append_child(a, a));
        assert_eq!(doc.parent(c), Some(a));
    }

    #[test]
    fn remove_subtree() {
        let (mut doc, body, a, b, c, d) = build_tree();
        let removed = doc.remove(a);
        assert!(removed.is_some_and(|d| d.has_class("a")));
        assert!(!doc.contains(a));
        assert!(!doc.contains(c));
        assert!(!doc.contains(d));
        assert_eq!(doc.children(body), &[b]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut doc, _, a, ..) = build_tree();
        assert!(doc.remove(a).is_some());
        assert!(doc.remove(a).is_none());
    }

    #[test]
    fn body_cannot_be_removed() {
        let mut doc = Document::new();
        assert!(doc.remove(doc.body()).is_none());
        assert!(doc.contains(doc.body()));
    }

    #[test]
    fn mutations_on_removed_node_are_noops() {
        let (mut doc, _, a, ..) = build_tree();
        doc.remove(a);
        assert!(!doc.set_style(a, "width", "50%"));
        assert!(!doc.set_text(a, "x"));
        assert!(!doc.set_attribute(a, "value", "x"));
        assert!(doc.style(a, "width").is_none());
        assert!(!doc.is_attached(a));
    }

    #[test]
    fn set_text_replaces_children() {
        let (mut doc, _, a, _, c, _) = build_tree();
        assert!(doc.set_text(a, "hello"));
        assert!(!doc.contains(c));
        assert_eq!(doc.children(a).len(), 1);
        assert_eq!(doc.text_content(a), "hello");
    }

    #[test]
    fn set_text_empty_leaves_no_children() {
        let (mut doc, _, a, ..) = build_tree();
        doc.set_text(a, "");
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn inner_markup_text_content_strips_tags() {
        let (mut doc, _, _, b, ..) = build_tree();
        doc.set_inner_markup(b, "<b>Saved</b> to disk");
        assert_eq!(doc.text_content(b), "Saved to disk");
    }

    #[test]
    fn style_and_attribute_roundtrip() {
        let (mut doc, _, a, ..) = build_tree();
        doc.set_style(a, "width", "100%");
        doc.set_attribute(a, "kv-name", "headers");
        assert_eq!(doc.style(a, "width"), Some("100%"));
        assert_eq!(doc.attribute(a, "kv-name"), Some("headers"));
    }

    #[test]
    fn walk_depth_first_order() {
        let (doc, body, a, b, c, d) = build_tree();
        assert_eq!(doc.walk_depth_first(body), vec![body, a, c, d, b]);
    }

    #[test]
    fn click_handler_dropped_with_node() {
        let (mut doc, _, a, _, c, _) = build_tree();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        assert!(doc.on_click(c, Rc::new(move |_: &App| counter.set(counter.get() + 1))));
        assert!(doc.click_handler(c).is_some());
        doc.remove(a);
        assert!(doc.click_handler(c).is_none());
        assert_eq!(Rc::strong_count(&hits), 1);
    }
}
