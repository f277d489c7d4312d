//! # ln-topology
//!
//! Lightning Network topology analysis.
//!
//! Ingests a point-in-time JSON snapshot of the network (nodes and
//! payment channels), builds a canonical in-memory graph, and feeds two
//! independent consumers:
//!
//! - **Enrichment**: per-node channel statistics (channel counts,
//!   enabled-channel ratio, total capacity).
//! - **Analysis**: a petgraph bridge plus distance statistics (average
//!   shortest path, diameter, radius).
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot JSON → snapshot::parse → TopologyGraph::build
//!                                        ├── enrich::enrich_graph
//!                                        └── bridge::to_petgraph → distance::distance_measures
//! ```
//!
//! The graph is immutable after construction; both consumers only read
//! it. The `analysis` feature (default on) carries the petgraph
//! dependency; without it the distance reporter returns
//! [`TopologyError::UnavailableDependency`] and callers degrade
//! gracefully.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod distance;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod snapshot;
pub mod types;

#[cfg(feature = "analysis")]
pub mod bridge;

// Re-exports
pub use distance::{DistanceOptions, DistanceReport};
pub use enrich::{enrich_graph, enrich_nodes};
pub use error::TopologyError;
pub use graph::{EdgeDirection, TopologyGraph};
pub use snapshot::ParsedSnapshot;
pub use types::{ChannelPolicy, ChannelRecord, EnrichedNode, NodeRecord, PubKey};

#[cfg(feature = "analysis")]
pub use bridge::{BridgeEdge, BridgeNode, BridgedTopology};
