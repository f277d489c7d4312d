//! Channel (edge) records for the topology graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::node::PubKey;

/// Routing policy for one direction of a channel.
///
/// Only the `disabled` flag participates in enrichment; the remaining
/// policy fields are carried through untouched so the full policy object
/// survives the round-trip to the graph cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelPolicy {
    /// Whether this direction is disabled. `None` means the snapshot did
    /// not state it, which is distinct from an explicit `true`.
    #[serde(default)]
    pub disabled: Option<bool>,
    /// Remaining policy fields (fees, HTLC limits), kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ChannelPolicy {
    /// Policy with an explicit `disabled` value and nothing else.
    pub fn with_disabled(disabled: bool) -> Self {
        Self {
            disabled: Some(disabled),
            extra: BTreeMap::new(),
        }
    }
}

/// A payment channel between two nodes.
///
/// `channel_id` and `capacity` are integers here; the snapshot parser is
/// responsible for coercing the string forms the wire format allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Channel identifier.
    pub channel_id: u64,
    /// Funding transaction outpoint.
    pub chan_point: String,
    /// Unix timestamp of the last update to this channel.
    #[serde(default)]
    pub last_update: i64,
    /// Channel capacity in satoshis.
    pub capacity: u64,
    /// First endpoint.
    pub node1_pub: PubKey,
    /// Second endpoint.
    pub node2_pub: PubKey,
    /// Policy for the node1 -> node2 direction.
    #[serde(default)]
    pub node1_policy: Option<ChannelPolicy>,
    /// Policy for the node2 -> node1 direction.
    #[serde(default)]
    pub node2_policy: Option<ChannelPolicy>,
}

impl ChannelRecord {
    /// Create a channel between two nodes with the given id and capacity.
    pub fn new(
        channel_id: u64,
        node1_pub: impl Into<PubKey>,
        node2_pub: impl Into<PubKey>,
        capacity: u64,
    ) -> Self {
        Self {
            channel_id,
            chan_point: String::new(),
            last_update: 0,
            capacity,
            node1_pub: node1_pub.into(),
            node2_pub: node2_pub.into(),
            node1_policy: None,
            node2_policy: None,
        }
    }

    /// Set both directional policies.
    pub fn with_policies(
        mut self,
        node1_policy: Option<ChannelPolicy>,
        node2_policy: Option<ChannelPolicy>,
    ) -> Self {
        self.node1_policy = node1_policy;
        self.node2_policy = node2_policy;
        self
    }

    /// Whether the given key is one of this channel's endpoints.
    pub fn is_incident_to(&self, key: &PubKey) -> bool {
        &self.node1_pub == key || &self.node2_pub == key
    }

    /// The policy on the side of the channel facing `key`.
    ///
    /// Returns `None` when the key is not an endpoint or the facing policy
    /// is absent. A self-referential channel resolves to its node1 side.
    pub fn policy_facing(&self, key: &PubKey) -> Option<&ChannelPolicy> {
        if &self.node1_pub == key {
            self.node1_policy.as_ref()
        } else if &self.node2_pub == key {
            self.node2_policy.as_ref()
        } else {
            None
        }
    }

    /// Whether the channel is enabled from `key`'s perspective.
    ///
    /// Enabled requires the facing policy to carry an explicit
    /// `disabled: false`; an absent policy or an absent flag counts as not
    /// enabled.
    pub fn is_enabled_toward(&self, key: &PubKey) -> bool {
        matches!(
            self.policy_facing(key).and_then(|p| p.disabled),
            Some(false)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PubKey {
        PubKey::new(s)
    }

    #[test]
    fn test_incidence() {
        let chan = ChannelRecord::new(1, "a", "b", 100);
        assert!(chan.is_incident_to(&key("a")));
        assert!(chan.is_incident_to(&key("b")));
        assert!(!chan.is_incident_to(&key("c")));
    }

    #[test]
    fn test_policy_facing_sides() {
        let chan = ChannelRecord::new(1, "a", "b", 100).with_policies(
            Some(ChannelPolicy::with_disabled(false)),
            Some(ChannelPolicy::with_disabled(true)),
        );
        assert_eq!(chan.policy_facing(&key("a")).unwrap().disabled, Some(false));
        assert_eq!(chan.policy_facing(&key("b")).unwrap().disabled, Some(true));
        assert!(chan.policy_facing(&key("c")).is_none());
    }

    #[test]
    fn test_enabled_requires_explicit_false() {
        let explicit = ChannelRecord::new(1, "a", "b", 100).with_policies(
            Some(ChannelPolicy::with_disabled(false)),
            Some(ChannelPolicy::default()),
        );
        // disabled: false -> enabled
        assert!(explicit.is_enabled_toward(&key("a")));
        // disabled absent -> not enabled
        assert!(!explicit.is_enabled_toward(&key("b")));

        // policy object absent -> not enabled
        let bare = ChannelRecord::new(2, "a", "b", 100);
        assert!(!bare.is_enabled_toward(&key("a")));
    }

    #[test]
    fn test_policy_extra_fields_survive() {
        let policy: ChannelPolicy = serde_json::from_str(
            r#"{"disabled": false, "fee_base_msat": "1000", "time_lock_delta": 40}"#,
        )
        .unwrap();
        assert_eq!(policy.disabled, Some(false));
        assert_eq!(policy.extra.len(), 2);

        let back = serde_json::to_value(&policy).unwrap();
        assert_eq!(back["fee_base_msat"], "1000");
        assert_eq!(back["time_lock_delta"], 40);
    }
}
