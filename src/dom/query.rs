//! Document queries: by class, within a subtree, by predicate.

use super::node::{NodeData, NodeId};
use super::tree::Document;

impl Document {
    /// All attached nodes with the given class, in document order.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_within(self.body(), |data| data.has_class(class))
    }

    /// Nodes in the subtree rooted at `root` (inclusive) matching `predicate`.
    pub fn query_within(&self, root: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(&predicate))
            .collect()
    }

    /// First node in the subtree rooted at `root` carrying `class`.
    pub fn find_class_within(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.query_within(root, |data| data.has_class(class))
            .into_iter()
            .next()
    }
}
