//! Document arena: slotmap-backed node tree with class/id queries and
//! markup sniffing.

pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId, NodeKind};
pub use tree::Document;
