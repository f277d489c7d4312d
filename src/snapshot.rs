//! Snapshot parser: raw JSON topology dumps into typed records.
//!
//! The wire format allows `channel_id` and `capacity` to arrive either as
//! JSON integers or as decimal strings; both are normalized to `u64` here,
//! at the parse boundary, so downstream stages never see the raw shapes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::TopologyError;
use crate::types::{ChannelPolicy, ChannelRecord, NodeRecord, PubKey};

/// A parsed snapshot: ordered node and channel records.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSnapshot {
    /// Node records in snapshot order.
    pub nodes: Vec<NodeRecord>,
    /// Channel records in snapshot order.
    pub channels: Vec<ChannelRecord>,
}

/// Integer field that may arrive as a string on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawInt {
    Int(u64),
    Str(String),
}

impl RawInt {
    fn coerce(&self, field: &'static str) -> Result<u64, TopologyError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Str(s) => s.trim().parse().map_err(|_| TopologyError::Coercion {
                field,
                value: s.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    channel_id: RawInt,
    chan_point: String,
    #[serde(default)]
    last_update: i64,
    capacity: RawInt,
    node1_pub: PubKey,
    node2_pub: PubKey,
    #[serde(default)]
    node1_policy: Option<ChannelPolicy>,
    #[serde(default)]
    node2_policy: Option<ChannelPolicy>,
}

impl RawChannel {
    fn into_record(self) -> Result<ChannelRecord, TopologyError> {
        Ok(ChannelRecord {
            channel_id: self.channel_id.coerce("channel_id")?,
            chan_point: self.chan_point,
            last_update: self.last_update,
            capacity: self.capacity.coerce("capacity")?,
            node1_pub: self.node1_pub,
            node2_pub: self.node2_pub,
            node1_policy: self.node1_policy,
            node2_policy: self.node2_policy,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    nodes: Vec<NodeRecord>,
    edges: Vec<RawChannel>,
}

impl RawSnapshot {
    fn into_parsed(self) -> Result<ParsedSnapshot, TopologyError> {
        let channels = self
            .edges
            .into_iter()
            .map(RawChannel::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ParsedSnapshot {
            nodes: self.nodes,
            channels,
        })
    }
}

/// Parse a snapshot from a JSON string.
///
/// Fails with [`TopologyError::MalformedInput`] when the input is not
/// valid JSON or the `nodes`/`edges` keys are missing, and with
/// [`TopologyError::Coercion`] when a `channel_id` or `capacity` cannot be
/// read as an integer.
pub fn parse_str(json: &str) -> Result<ParsedSnapshot, TopologyError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    let parsed = raw.into_parsed()?;
    debug!(
        nodes = parsed.nodes.len(),
        channels = parsed.channels.len(),
        "parsed snapshot"
    );
    Ok(parsed)
}

/// Parse a snapshot from a file on disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedSnapshot, TopologyError> {
    let file = File::open(path.as_ref())?;
    let raw: RawSnapshot = serde_json::from_reader(BufReader::new(file))?;
    let parsed = raw.into_parsed()?;
    debug!(
        path = %path.as_ref().display(),
        nodes = parsed.nodes.len(),
        channels = parsed.channels.len(),
        "parsed snapshot file"
    );
    Ok(parsed)
}
