//! Peripheral widgets: KvPairs, InfoBubble.

pub mod info_bubble;
pub mod kv_pairs;

pub use info_bubble::InfoBubble;
pub use kv_pairs::{KvPair, KvPairs, KvRow};
