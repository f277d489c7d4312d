//! Node records for the topology graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Public key identifying a network node.
///
/// Wraps the hex-encoded key string and implements `Ord` so node sets
/// iterate in a deterministic order. The key is the sole join key between
/// the node set and the channel set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PubKey(String);

impl PubKey {
    /// Create a new PubKey from a key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PubKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PubKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A network participant from the snapshot.
///
/// All display attributes are optional; `last_update` defaults to 0 when
/// the snapshot omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique public key (join key for channels).
    pub pub_key: PubKey,
    /// Display alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// Advertised network addresses.
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
    /// Display color.
    #[serde(default)]
    pub color: Option<String>,
    /// Unix timestamp of the last update to this node.
    #[serde(default)]
    pub last_update: i64,
}

impl NodeRecord {
    /// Create a node record with no optional attributes set.
    pub fn new(pub_key: impl Into<PubKey>) -> Self {
        Self {
            pub_key: pub_key.into(),
            alias: None,
            addresses: None,
            color: None,
            last_update: 0,
        }
    }

    /// Set the display alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the last-update timestamp.
    pub fn with_last_update(mut self, ts: i64) -> Self {
        self.last_update = ts;
        self
    }
}
