//! Event system: click handlers, custom messages, dispatch.

pub mod handler;
pub mod message;

pub use handler::{ClickHandler, EventDispatcher};
pub use message::{Envelope, Message, PairDeleted};
