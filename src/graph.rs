//! Canonical in-memory topology graph.
//!
//! Vertices are network nodes keyed by public key; edges are payment
//! channels. The builder fails fast on duplicate keys and dangling
//! endpoints, so a constructed graph is always structurally consistent:
//! every channel endpoint resolves to a vertex. After construction the
//! graph is read-only; enrichment, bridging and distance reporting all
//! consume it without mutating it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TopologyError;
use crate::snapshot::{self, ParsedSnapshot};
use crate::types::{ChannelRecord, NodeRecord, PubKey};

/// Whether channels are treated as directed edges.
///
/// Directed graphs preserve the `node1_pub -> node2_pub` orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// Channels connect both endpoints symmetrically (the default).
    #[default]
    Undirected,
    /// Channels run from `node1_pub` to `node2_pub` only.
    Directed,
}

/// The canonical graph built from a parsed snapshot.
///
/// Nodes live in a `BTreeMap` for deterministic iteration order; channels
/// keep snapshot order. Parallel channels between the same pair of nodes
/// are kept as distinct edges.
///
/// Deserialization goes through [`TopologyGraph::build`], so a graph read
/// back from a cache file gets the same duplicate-key and dangling-edge
/// validation as one built from a fresh snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphParts", into = "GraphParts")]
pub struct TopologyGraph {
    direction: EdgeDirection,
    nodes: BTreeMap<PubKey, NodeRecord>,
    channels: Vec<ChannelRecord>,
}

/// Wire form of [`TopologyGraph`]: nodes as a flat list so duplicates are
/// still visible to validation on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphParts {
    #[serde(default)]
    direction: EdgeDirection,
    nodes: Vec<NodeRecord>,
    channels: Vec<ChannelRecord>,
}

impl From<TopologyGraph> for GraphParts {
    fn from(graph: TopologyGraph) -> Self {
        Self {
            direction: graph.direction,
            nodes: graph.nodes.into_values().collect(),
            channels: graph.channels,
        }
    }
}

impl TryFrom<GraphParts> for TopologyGraph {
    type Error = TopologyError;

    fn try_from(parts: GraphParts) -> Result<Self, Self::Error> {
        Self::build(parts.nodes, parts.channels, parts.direction)
    }
}

impl TopologyGraph {
    /// Build a graph from node and channel records.
    ///
    /// Fails with [`TopologyError::DuplicateNode`] when a `pub_key`
    /// repeats and [`TopologyError::DanglingEdge`] when a channel endpoint
    /// has no corresponding node. No partial graph is returned on error.
    pub fn build(
        nodes: Vec<NodeRecord>,
        channels: Vec<ChannelRecord>,
        direction: EdgeDirection,
    ) -> Result<Self, TopologyError> {
        let mut node_map: BTreeMap<PubKey, NodeRecord> = BTreeMap::new();
        for node in nodes {
            let key = node.pub_key.clone();
            if node_map.insert(key.clone(), node).is_some() {
                return Err(TopologyError::DuplicateNode(key));
            }
        }

        for chan in &channels {
            for endpoint in [&chan.node1_pub, &chan.node2_pub] {
                if !node_map.contains_key(endpoint) {
                    return Err(TopologyError::DanglingEdge {
                        channel_id: chan.channel_id,
                        pub_key: endpoint.clone(),
                    });
                }
            }
        }

        info!(
            nodes = node_map.len(),
            channels = channels.len(),
            directed = matches!(direction, EdgeDirection::Directed),
            "built topology graph"
        );

        Ok(Self {
            direction,
            nodes: node_map,
            channels,
        })
    }

    /// Build a graph from an already-parsed snapshot.
    pub fn from_snapshot(
        parsed: ParsedSnapshot,
        direction: EdgeDirection,
    ) -> Result<Self, TopologyError> {
        Self::build(parsed.nodes, parsed.channels, direction)
    }

    /// Parse a snapshot file and build a graph from it.
    pub fn from_snapshot_file(
        path: impl AsRef<Path>,
        direction: EdgeDirection,
    ) -> Result<Self, TopologyError> {
        let parsed = snapshot::parse_file(path)?;
        Self::from_snapshot(parsed, direction)
    }

    /// Edge direction this graph was built with.
    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    /// Whether this graph is directed.
    pub fn is_directed(&self) -> bool {
        self.direction == EdgeDirection::Directed
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Look up a node by public key.
    pub fn node(&self, key: &PubKey) -> Option<&NodeRecord> {
        self.nodes.get(key)
    }

    /// Whether a node with this key exists.
    pub fn contains(&self, key: &PubKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterate nodes in canonical (key) order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    /// All channels in snapshot order.
    pub fn channels(&self) -> &[ChannelRecord] {
        &self.channels
    }

    /// Channels incident to the given node, in snapshot order.
    pub fn channels_of<'a>(
        &'a self,
        key: &'a PubKey,
    ) -> impl Iterator<Item = &'a ChannelRecord> {
        self.channels.iter().filter(move |c| c.is_incident_to(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_nodes(keys: &[&str]) -> Vec<NodeRecord> {
        keys.iter().map(|k| NodeRecord::new(*k)).collect()
    }

    #[test]
    fn test_counts_match_input() {
        let nodes = make_nodes(&["a", "b", "c"]);
        let channels = vec![
            ChannelRecord::new(1, "a", "b", 10),
            ChannelRecord::new(2, "b", "c", 20),
        ];
        let graph =
            TopologyGraph::build(nodes, channels, EdgeDirection::Undirected).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.channel_count(), 2);
    }

    #[test]
    fn test_duplicate_pub_key_fails() {
        let nodes = make_nodes(&["a", "b", "a"]);
        let err =
            TopologyGraph::build(nodes, vec![], EdgeDirection::Undirected).unwrap_err();
        match err {
            TopologyError::DuplicateNode(key) => assert_eq!(key.as_str(), "a"),
            other => panic!("expected DuplicateNode, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_endpoint_fails() {
        let nodes = make_nodes(&["a", "b"]);
        let channels = vec![ChannelRecord::new(9, "a", "ghost", 10)];
        let err = TopologyGraph::build(nodes, channels, EdgeDirection::Undirected)
            .unwrap_err();
        match err {
            TopologyError::DanglingEdge {
                channel_id,
                pub_key,
            } => {
                assert_eq!(channel_id, 9);
                assert_eq!(pub_key.as_str(), "ghost");
            }
            other => panic!("expected DanglingEdge, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_channels_kept_distinct() {
        let nodes = make_nodes(&["a", "b"]);
        let channels = vec![
            ChannelRecord::new(1, "a", "b", 10),
            ChannelRecord::new(2, "a", "b", 20),
        ];
        let graph =
            TopologyGraph::build(nodes, channels, EdgeDirection::Undirected).unwrap();
        assert_eq!(graph.channel_count(), 2);
        let key = PubKey::new("a");
        assert_eq!(graph.channels_of(&key).count(), 2);
    }

    #[test]
    fn test_incident_channel_scan() {
        let nodes = make_nodes(&["a", "b", "c"]);
        let channels = vec![
            ChannelRecord::new(1, "a", "b", 10),
            ChannelRecord::new(2, "b", "c", 20),
        ];
        let graph =
            TopologyGraph::build(nodes, channels, EdgeDirection::Undirected).unwrap();

        let b = PubKey::new("b");
        let incident: Vec<u64> = graph.channels_of(&b).map(|c| c.channel_id).collect();
        assert_eq!(incident, vec![1, 2]);

        let a = PubKey::new("a");
        assert_eq!(graph.channels_of(&a).count(), 1);
    }

    #[test]
    fn test_nodes_iterate_in_key_order() {
        let nodes = make_nodes(&["c", "a", "b"]);
        let graph = TopologyGraph::build(nodes, vec![], EdgeDirection::Undirected).unwrap();
        let keys: Vec<&str> = graph.nodes().map(|n| n.pub_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let nodes = make_nodes(&["a", "b"]);
        let channels = vec![ChannelRecord::new(1, "a", "b", 10)];
        let graph =
            TopologyGraph::build(nodes, channels, EdgeDirection::Directed).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let back: TopologyGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_deserialize_validates_dangling_edge() {
        // A hand-crafted wire form whose channel endpoint has no node must
        // be rejected, not silently accepted.
        let json = r#"{
            "direction": "Undirected",
            "nodes": [{"pub_key": "a"}],
            "channels": [{
                "channel_id": 1, "chan_point": "aa:0", "capacity": 10,
                "node1_pub": "a", "node2_pub": "ghost"
            }]
        }"#;
        let err = serde_json::from_str::<TopologyGraph>(json).unwrap_err();
        assert!(err.to_string().contains("unknown node ghost"));
    }

    #[test]
    fn test_deserialize_validates_duplicate_node() {
        let json = r#"{
            "direction": "Undirected",
            "nodes": [{"pub_key": "a"}, {"pub_key": "a"}],
            "channels": []
        }"#;
        let err = serde_json::from_str::<TopologyGraph>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate node pub_key"));
    }

    #[test]
    fn test_directed_flag_preserved() {
        let graph = TopologyGraph::build(
            make_nodes(&["a"]),
            vec![],
            EdgeDirection::Directed,
        )
        .unwrap();
        assert!(graph.is_directed());
    }
}
