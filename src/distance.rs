//! Distance reporter: shortest-path statistics over the bridged graph.
//!
//! Distances are unweighted hop counts from breadth-first traversal.
//! Unreached pairs are an explicit `None`, never a zero sentinel, and are
//! excluded from the mean, eccentricity and radius reductions along with
//! self-distances.

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::graph::TopologyGraph;

/// Configuration for a distance report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistanceOptions {
    /// Approximate the diameter with a double-sweep heuristic instead of
    /// taking the exact maximum finite distance. Cheaper, but only a
    /// heuristic: the result is a lower bound on the true diameter.
    pub pseudo_diameter: bool,
}

/// Reduced distance statistics for a graph.
///
/// All fields are `None` when no finite node pair exists (empty graph or
/// fully disconnected vertices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Mean of all finite pairwise distances, self-pairs excluded.
    pub average_distance: Option<f64>,
    /// Maximum finite distance (exact), or the double-sweep estimate.
    pub diameter: Option<u32>,
    /// Minimum over vertices of each vertex's maximum finite distance.
    pub radius: Option<u32>,
    /// Whether `diameter` came from the approximate double sweep.
    pub approximate_diameter: bool,
}

#[cfg(feature = "analysis")]
pub use imp::{distance_measures, shortest_distances, DistanceMatrix};

#[cfg(feature = "analysis")]
mod imp {
    use std::collections::VecDeque;

    use petgraph::graph::NodeIndex;
    use petgraph::EdgeType;
    use tracing::{debug, info};

    use super::{DistanceOptions, DistanceReport, TopologyError, TopologyGraph};
    use crate::bridge::{self, BridgedTopology};

    /// All-pairs distance matrix with an explicit unreached sentinel.
    ///
    /// Row `i` holds the hop distances from vertex `i`; `None` marks an
    /// unreachable target. The self-distance is `Some(0)`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DistanceMatrix {
        rows: Vec<Vec<Option<u32>>>,
    }

    impl DistanceMatrix {
        /// Number of vertices.
        pub fn len(&self) -> usize {
            self.rows.len()
        }

        /// Whether the matrix is empty.
        pub fn is_empty(&self) -> bool {
            self.rows.is_empty()
        }

        /// Distance from vertex `from` to vertex `to`, `None` if unreached.
        pub fn get(&self, from: usize, to: usize) -> Option<u32> {
            self.rows[from][to]
        }

        /// The distance row for one source vertex.
        pub fn row(&self, from: usize) -> &[Option<u32>] {
            &self.rows[from]
        }
    }

    /// Hop distances from one source vertex.
    fn bfs_distances<Ty: EdgeType>(
        bridged: &BridgedTopology<Ty>,
        source: NodeIndex,
    ) -> Vec<Option<u32>> {
        let mut dist: Vec<Option<u32>> = vec![None; bridged.graph.node_count()];
        let mut queue = VecDeque::new();

        dist[source.index()] = Some(0);
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            let d = dist[v.index()].unwrap_or(0);
            for next in bridged.graph.neighbors(v) {
                if dist[next.index()].is_none() {
                    dist[next.index()] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }

        dist
    }

    /// Compute the all-pairs distance matrix of a bridged graph.
    pub fn shortest_distances<Ty: EdgeType>(bridged: &BridgedTopology<Ty>) -> DistanceMatrix {
        let rows = bridged
            .graph
            .node_indices()
            .map(|source| bfs_distances(bridged, source))
            .collect();
        DistanceMatrix { rows }
    }

    /// Double-sweep pseudo-diameter: repeated BFS from the farthest vertex
    /// found so far, until the eccentricity estimate stops growing.
    fn pseudo_diameter<Ty: EdgeType>(bridged: &BridgedTopology<Ty>) -> Option<u32> {
        let mut source = bridged.graph.node_indices().next()?;
        let mut best: Option<u32> = None;

        loop {
            let dist = bfs_distances(bridged, source);
            let farthest = dist
                .iter()
                .enumerate()
                .filter_map(|(i, d)| d.map(|d| (i, d)))
                .max_by_key(|&(_, d)| d)?;
            let (idx, ecc) = farthest;

            if best.is_some_and(|b| ecc <= b) {
                return best;
            }
            best = Some(ecc);
            source = NodeIndex::new(idx);
        }
    }

    fn reduce<Ty: EdgeType>(
        bridged: &BridgedTopology<Ty>,
        opts: &DistanceOptions,
    ) -> DistanceReport {
        let matrix = shortest_distances(bridged);
        let n = matrix.len();

        let mut sum: u64 = 0;
        let mut pairs: u64 = 0;
        let mut exact_diameter: Option<u32> = None;
        let mut radius: Option<u32> = None;

        for i in 0..n {
            // Eccentricity of i: max finite distance to another vertex.
            let mut ecc: Option<u32> = None;
            for j in 0..n {
                if i == j {
                    continue;
                }
                if let Some(d) = matrix.get(i, j) {
                    sum += u64::from(d);
                    pairs += 1;
                    ecc = Some(ecc.map_or(d, |e| e.max(d)));
                }
            }
            if let Some(e) = ecc {
                exact_diameter = Some(exact_diameter.map_or(e, |d| d.max(e)));
                radius = Some(radius.map_or(e, |r| r.min(e)));
            }
        }

        let average_distance = (pairs > 0).then(|| sum as f64 / pairs as f64);
        let diameter = if pairs == 0 {
            // No finite pair anywhere: the double sweep would report a
            // zero eccentricity, which is not a diameter.
            None
        } else if opts.pseudo_diameter {
            pseudo_diameter(bridged)
        } else {
            exact_diameter
        };

        debug!(vertices = n, finite_pairs = pairs, "reduced distance matrix");

        DistanceReport {
            average_distance,
            diameter,
            radius,
            approximate_diameter: opts.pseudo_diameter,
        }
    }

    /// Compute distance statistics for a built graph.
    ///
    /// Bridges the graph (structure only) with the directedness it was
    /// built with, runs all-pairs BFS, and reduces to average distance,
    /// diameter and radius.
    pub fn distance_measures(
        graph: &TopologyGraph,
        opts: &DistanceOptions,
    ) -> Result<DistanceReport, TopologyError> {
        let report = if graph.is_directed() {
            reduce(&bridge::to_directed(graph, false), opts)
        } else {
            reduce(&bridge::to_undirected(graph, false), opts)
        };

        info!(
            average = ?report.average_distance,
            diameter = ?report.diameter,
            radius = ?report.radius,
            approximate = report.approximate_diameter,
            "computed distance measures"
        );

        Ok(report)
    }
}

/// Distance statistics are unavailable in builds without the `analysis`
/// feature; callers are expected to report the condition and continue.
#[cfg(not(feature = "analysis"))]
pub fn distance_measures(
    _graph: &TopologyGraph,
    _opts: &DistanceOptions,
) -> Result<DistanceReport, TopologyError> {
    Err(TopologyError::UnavailableDependency(
        "this build does not include the `analysis` feature",
    ))
}
