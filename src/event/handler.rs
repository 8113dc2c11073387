//! Event dispatch: click handlers, custom-event queue and bubble paths.
//!
//! Clicks are delivered synchronously through [`ClickHandler`] closures stored
//! on the document. Custom events ([`Envelope`]s) are queued in an
//! [`EventDispatcher`] and drained by the embedding application.

use std::collections::VecDeque;
use std::rc::Rc;

use super::message::Envelope;
use crate::app::App;
use crate::dom::node::NodeId;
use crate::dom::tree::Document;

/// A click listener. Receives the app so it can act on it without capturing it.
pub type ClickHandler = Rc<dyn Fn(&App)>;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Most custom events kept before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Queue-based custom event dispatcher.
///
/// Holds at most [`MAX_PENDING_EVENTS`] envelopes; pushing onto a full queue
/// drops the oldest one.
#[derive(Debug)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a message envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        if self.queue.len() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.queue.pop_front() {
                tracing::warn!(
                    event = dropped.message.message_name(),
                    "custom event queue full, dropping oldest event"
                );
            }
        }
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages and return them as a `Vec`.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to its topmost ancestor (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ...]`, or an empty vec if `start`
    /// is not in the document.
    pub fn bubble_path(doc: &Document, start: NodeId) -> Vec<NodeId> {
        if !doc.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(doc.ancestors(start));
        path
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
