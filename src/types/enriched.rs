//! Enriched node records: per-node channel statistics.

use serde::{Deserialize, Serialize};

use super::node::NodeRecord;

/// A node together with its derived channel statistics.
///
/// Produced by a full enrichment pass over the channel set; never
/// maintained incrementally. `percent_enabled_chan` is absent (not zero)
/// for nodes with no channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedNode {
    /// The underlying node record.
    #[serde(flatten)]
    pub node: NodeRecord,
    /// Number of channels incident to this node.
    pub num_channels: u32,
    /// Number of incident channels whose policy facing this node carries
    /// an explicit `disabled: false`.
    pub num_enabled_channels: u32,
    /// `num_enabled_channels / num_channels`, absent when the node has no
    /// channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_enabled_chan: Option<f64>,
    /// Sum of incident channel capacities in satoshis.
    pub total_node_capacity: u64,
}

impl EnrichedNode {
    /// An enriched record for a node with no incident channels.
    pub fn isolated(node: NodeRecord) -> Self {
        Self {
            node,
            num_channels: 0,
            num_enabled_channels: 0,
            percent_enabled_chan: None,
            total_node_capacity: 0,
        }
    }
}
