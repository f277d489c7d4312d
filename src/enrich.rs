//! Node enrichment: per-node channel statistics.
//!
//! A single pass over the channel set accumulates per-endpoint counters,
//! then each node record is joined with its accumulated stats. This is
//! behaviorally identical to scanning all channels per node, at
//! O(nodes + channels) instead of O(nodes x channels).

use std::collections::BTreeMap;

use tracing::debug;

use crate::graph::TopologyGraph;
use crate::types::{ChannelRecord, EnrichedNode, NodeRecord, PubKey};

#[derive(Debug, Clone, Copy, Default)]
struct ChannelStats {
    channels: u32,
    enabled: u32,
    capacity: u64,
}

impl ChannelStats {
    fn record(&mut self, chan: &ChannelRecord, key: &PubKey) {
        self.channels += 1;
        self.capacity += chan.capacity;
        if chan.is_enabled_toward(key) {
            self.enabled += 1;
        }
    }
}

/// Compute enriched records for the given nodes against the channel set.
///
/// Output order follows input node order. A node with no incident
/// channels gets zero counts and no `percent_enabled_chan` value. Never
/// fails: enrichment has no error path on well-formed records.
pub fn enrich_nodes(nodes: &[NodeRecord], channels: &[ChannelRecord]) -> Vec<EnrichedNode> {
    let mut stats: BTreeMap<&PubKey, ChannelStats> = BTreeMap::new();

    for chan in channels {
        stats
            .entry(&chan.node1_pub)
            .or_default()
            .record(chan, &chan.node1_pub);
        // A self-referential channel counts once, against its node1 side.
        if chan.node2_pub != chan.node1_pub {
            stats
                .entry(&chan.node2_pub)
                .or_default()
                .record(chan, &chan.node2_pub);
        }
    }

    let enriched: Vec<EnrichedNode> = nodes
        .iter()
        .map(|node| match stats.get(&node.pub_key).copied() {
            None => EnrichedNode::isolated(node.clone()),
            Some(s) => EnrichedNode {
                node: node.clone(),
                num_channels: s.channels,
                num_enabled_channels: s.enabled,
                percent_enabled_chan: Some(f64::from(s.enabled) / f64::from(s.channels)),
                total_node_capacity: s.capacity,
            },
        })
        .collect();

    debug!(nodes = enriched.len(), channels = channels.len(), "enriched nodes");
    enriched
}

/// Enrich every node of a built graph, in canonical key order.
pub fn enrich_graph(graph: &TopologyGraph) -> Vec<EnrichedNode> {
    let nodes: Vec<NodeRecord> = graph.nodes().cloned().collect();
    enrich_nodes(&nodes, graph.channels())
}
