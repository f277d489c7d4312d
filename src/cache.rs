//! Graph cache: persist a built graph for reuse across runs.
//!
//! The cache file is an opaque JSON serialization of [`TopologyGraph`];
//! no cross-version compatibility is promised. Building from a snapshot
//! is cheap enough that a stale cache can always be thrown away.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::TopologyError;
use crate::graph::TopologyGraph;

/// Timestamped file name for a freshly built graph cache.
pub fn cache_file_name(now: chrono::DateTime<Local>) -> String {
    format!("ln_graph_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Write a graph cache into `dir`, returning the path written.
pub fn save_graph(graph: &TopologyGraph, dir: impl AsRef<Path>) -> Result<PathBuf, TopologyError> {
    let path = dir.as_ref().join(cache_file_name(Local::now()));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, graph)?;
    writer.flush()?;
    info!(path = %path.display(), "saved graph cache");
    Ok(path)
}

/// Load a previously cached graph.
pub fn load_graph(path: impl AsRef<Path>) -> Result<TopologyGraph, TopologyError> {
    let file = File::open(path.as_ref())?;
    let graph: TopologyGraph = serde_json::from_reader(BufReader::new(file))?;
    info!(
        path = %path.as_ref().display(),
        nodes = graph.node_count(),
        channels = graph.channel_count(),
        "loaded graph cache"
    );
    Ok(graph)
}
