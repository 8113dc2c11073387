//! Message trait, envelope, and built-in custom events.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with its sender.
//! Built-in messages: [`PairDeleted`].

use std::any::Any;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// All messages must implement `as_any` for downcasting and `message_name`
/// for debug/logging purposes.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A queued message and the node that sent it.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The node that sent this message.
    pub sender: NodeId,
}

impl Envelope {
    /// Wrap `message` sent from `sender`.
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
        }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// A key-value editor row was deleted through its remove control.
///
/// `sender` is the editor's host node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairDeleted {
    /// The editor's `kv-name`.
    pub editor: String,
}

impl PairDeleted {
    /// Event detail string, kept for parity with the DOM custom event.
    pub const DETAIL: &'static str = "delete";

    pub fn detail(&self) -> &'static str {
        Self::DETAIL
    }
}

impl Message for PairDeleted {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "PairDeleted"
    }
}

// ===========================================================================
// Tests
// ===========================================================================
