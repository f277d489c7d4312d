//! Format bridge: canonical topology graph to petgraph.
//!
//! petgraph addresses vertices by integer index rather than by key, so the
//! bridge keeps an explicit `pub_key -> NodeIndex` table alongside the
//! converted graph. Every bridged edge also carries the original
//! `(node1_pub, node2_pub)` pair, so callers can recover keys after
//! index-based traversal without consulting the table.

use std::collections::BTreeMap;
use std::path::Path;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::{Directed, EdgeType, Undirected};
use tracing::debug;

use crate::error::TopologyError;
use crate::graph::{EdgeDirection, TopologyGraph};
use crate::types::{ChannelRecord, NodeRecord, PubKey};

/// Vertex weight in the bridged representation.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeNode {
    /// The node's public key (always present).
    pub pub_key: PubKey,
    /// Full node attributes, omitted when bridging structure only.
    pub attributes: Option<NodeRecord>,
}

/// Edge weight in the bridged representation.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeEdge {
    /// Original first endpoint key.
    pub node1_pub: PubKey,
    /// Original second endpoint key.
    pub node2_pub: PubKey,
    /// Full channel attributes, omitted when bridging structure only.
    pub attributes: Option<ChannelRecord>,
}

/// A petgraph view of a [`TopologyGraph`] plus the vertex-index table.
#[derive(Debug, Clone)]
pub struct BridgedTopology<Ty: EdgeType = Undirected> {
    /// The converted graph.
    pub graph: Graph<BridgeNode, BridgeEdge, Ty>,
    /// Public key to petgraph vertex index.
    pub index: BTreeMap<PubKey, NodeIndex>,
}

impl<Ty: EdgeType> BridgedTopology<Ty> {
    /// Resolve a public key to its vertex index.
    pub fn node_index(&self, key: &PubKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Recover the public key behind a vertex index.
    pub fn pub_key(&self, idx: NodeIndex) -> Option<&PubKey> {
        self.graph.node_weight(idx).map(|n| &n.pub_key)
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Convert a topology graph into a petgraph of the given edge type.
///
/// Vertex and edge counts match the source exactly; insertion follows the
/// source's canonical node order and snapshot channel order. When
/// `with_attributes` is false the node and channel records are left off
/// the weights, keeping only the key material.
pub fn to_petgraph<Ty: EdgeType>(
    src: &TopologyGraph,
    with_attributes: bool,
) -> BridgedTopology<Ty> {
    let mut graph: Graph<BridgeNode, BridgeEdge, Ty> = Graph::default();
    let mut index: BTreeMap<PubKey, NodeIndex> = BTreeMap::new();

    for node in src.nodes() {
        let idx = graph.add_node(BridgeNode {
            pub_key: node.pub_key.clone(),
            attributes: with_attributes.then(|| node.clone()),
        });
        index.insert(node.pub_key.clone(), idx);
    }

    for chan in src.channels() {
        // Endpoints were validated by the builder.
        let a = index[&chan.node1_pub];
        let b = index[&chan.node2_pub];
        graph.add_edge(
            a,
            b,
            BridgeEdge {
                node1_pub: chan.node1_pub.clone(),
                node2_pub: chan.node2_pub.clone(),
                attributes: with_attributes.then(|| chan.clone()),
            },
        );
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        with_attributes,
        "bridged topology graph"
    );

    BridgedTopology { graph, index }
}

/// Bridge to an undirected petgraph.
pub fn to_undirected(src: &TopologyGraph, with_attributes: bool) -> BridgedTopology<Undirected> {
    to_petgraph(src, with_attributes)
}

/// Bridge to a directed petgraph, preserving `node1_pub -> node2_pub`
/// orientation.
pub fn to_directed(src: &TopologyGraph, with_attributes: bool) -> BridgedTopology<Directed> {
    to_petgraph(src, with_attributes)
}

/// Parse a snapshot file, build the canonical graph, and bridge it in one
/// step.
pub fn bridge_snapshot_file(
    path: impl AsRef<Path>,
    with_attributes: bool,
) -> Result<BridgedTopology<Undirected>, TopologyError> {
    let graph = TopologyGraph::from_snapshot_file(path, EdgeDirection::Undirected)?;
    Ok(to_undirected(&graph, with_attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeRecord;

    fn make_graph() -> TopologyGraph {
        let nodes = vec![
            NodeRecord::new("a").with_alias("alpha"),
            NodeRecord::new("b"),
            NodeRecord::new("c"),
        ];
        let channels = vec![
            ChannelRecord::new(1, "a", "b", 10),
            ChannelRecord::new(2, "b", "c", 20),
            ChannelRecord::new(3, "a", "b", 30),
        ];
        TopologyGraph::build(nodes, channels, EdgeDirection::Undirected).unwrap()
    }

    #[test]
    fn test_counts_preserved() {
        let src = make_graph();
        let bridged = to_undirected(&src, true);
        assert_eq!(bridged.node_count(), src.node_count());
        assert_eq!(bridged.edge_count(), src.channel_count());
    }

    #[test]
    fn test_index_round_trip() {
        let src = make_graph();
        let bridged = to_undirected(&src, true);

        for node in src.nodes() {
            let idx = bridged.node_index(&node.pub_key).unwrap();
            assert_eq!(bridged.pub_key(idx), Some(&node.pub_key));
        }
    }

    #[test]
    fn test_edge_endpoints_recoverable() {
        let src = make_graph();
        let bridged = to_undirected(&src, false);

        for edge_idx in bridged.graph.edge_indices() {
            let weight = &bridged.graph[edge_idx];
            let (a, b) = bridged.graph.edge_endpoints(edge_idx).unwrap();
            // Resolving endpoints through the index map must yield the
            // original (node1_pub, node2_pub) pair.
            assert_eq!(bridged.node_index(&weight.node1_pub), Some(a));
            assert_eq!(bridged.node_index(&weight.node2_pub), Some(b));
        }
    }

    #[test]
    fn test_attributes_omitted_when_disabled() {
        let src = make_graph();
        let bare = to_undirected(&src, false);
        assert!(bare
            .graph
            .node_weights()
            .all(|n| n.attributes.is_none()));
        assert!(bare
            .graph
            .edge_weights()
            .all(|e| e.attributes.is_none()));

        let full = to_undirected(&src, true);
        let a_idx = full.node_index(&PubKey::new("a")).unwrap();
        let attrs = full.graph[a_idx].attributes.as_ref().unwrap();
        assert_eq!(attrs.alias.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_directed_orientation_preserved() {
        let nodes = vec![NodeRecord::new("a"), NodeRecord::new("b")];
        let channels = vec![ChannelRecord::new(1, "a", "b", 10)];
        let src = TopologyGraph::build(nodes, channels, EdgeDirection::Directed).unwrap();

        let bridged = to_directed(&src, false);
        let a = bridged.node_index(&PubKey::new("a")).unwrap();
        let b = bridged.node_index(&PubKey::new("b")).unwrap();

        assert!(bridged.graph.find_edge(a, b).is_some());
        assert!(bridged.graph.find_edge(b, a).is_none());
    }
}
