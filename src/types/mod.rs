//! Core record types for the topology pipeline.

pub mod channel;
pub mod enriched;
pub mod node;

pub use channel::{ChannelPolicy, ChannelRecord};
pub use enriched::EnrichedNode;
pub use node::{NodeRecord, PubKey};
