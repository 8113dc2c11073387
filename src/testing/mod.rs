//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) programmatically and
//! [`document_to_string`] to capture the document as text for snapshot-style
//! assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{document_to_string, node_to_string};
