//! Error taxonomy for the topology pipeline.

use crate::types::PubKey;

/// Errors produced by the topology pipeline.
///
/// The parser and builder fail fast: no partial snapshot or graph is ever
/// returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// Snapshot is not valid JSON or is structurally incomplete.
    #[error("malformed snapshot: {0}")]
    MalformedInput(String),
    /// A node public key appears more than once in the snapshot.
    #[error("duplicate node pub_key: {0}")]
    DuplicateNode(PubKey),
    /// A channel references a public key with no corresponding node.
    #[error("channel {channel_id} references unknown node {pub_key}")]
    DanglingEdge {
        /// The offending channel.
        channel_id: u64,
        /// The endpoint key with no matching node.
        pub_key: PubKey,
    },
    /// A `channel_id` or `capacity` value could not be coerced to an integer.
    #[error("cannot coerce {field} value {value:?} to an integer")]
    Coercion {
        /// The field being coerced.
        field: &'static str,
        /// The raw value as it appeared in the snapshot.
        value: String,
    },
    /// Graph-analysis support was not compiled into this build.
    #[error("graph analysis unavailable: {0}")]
    UnavailableDependency(&'static str),
    /// Underlying I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TopologyError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}
