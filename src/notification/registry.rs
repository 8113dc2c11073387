//! Bookkeeping of visible notifications.
//!
//! One registry exists per [`App`](crate::app::App). Every live entry has an
//! attached root node and every attached notification root has exactly one
//! entry.

use crate::dom::node::NodeId;
use crate::dom::tree::Document;

/// A registered notification: its identity and the root node it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveInstance {
    pub identity: u64,
    pub root: NodeId,
}

/// Insertion-ordered live notifications plus the identity counter.
#[derive(Debug, Default)]
pub struct Registry {
    live: Vec<LiveInstance>,
    counter: u64,
}

impl Registry {
    /// An empty registry; the first identity handed out is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter and return it.
    pub fn next_identity(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// Append an entry.
    pub fn register(&mut self, instance: LiveInstance) {
        tracing::debug!(identity = instance.identity, "notification registered");
        self.live.push(instance);
    }

    /// Remove the first entry with `identity`. No-op if absent.
    pub fn unregister(&mut self, identity: u64) -> Option<LiveInstance> {
        let index = self.live.iter().position(|i| i.identity == identity)?;
        tracing::debug!(identity, "notification unregistered");
        Some(self.live.remove(index))
    }

    /// Remove the entry matching both identity and root. Identities restart
    /// after [`clear_all`](Self::clear_all); the root tells a current entry
    /// apart from an older one that carried the same number.
    pub fn unregister_instance(&mut self, instance: LiveInstance) -> Option<LiveInstance> {
        let index = self.live.iter().position(|i| *i == instance)?;
        tracing::debug!(identity = instance.identity, "notification unregistered");
        Some(self.live.remove(index))
    }

    /// Remove every live root from `document`, forget all entries and reset
    /// the counter. Returns how many entries were cleared.
    pub fn clear_all(&mut self, document: &mut Document) -> usize {
        let cleared = self.live.len();
        for instance in self.live.drain(..) {
            document.remove(instance.root);
        }
        self.counter = 0;
        tracing::debug!(cleared, "notifications cleared");
        cleared
    }

    /// Whether `instance` is still registered.
    pub fn contains(&self, instance: LiveInstance) -> bool {
        self.live.contains(&instance)
    }

    /// Live entries in insertion order.
    pub fn live(&self) -> &[LiveInstance] {
        &self.live
    }

    /// Identities of live entries in insertion order.
    pub fn identities(&self) -> Vec<u64> {
        self.live.iter().map(|i| i.identity).collect()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
