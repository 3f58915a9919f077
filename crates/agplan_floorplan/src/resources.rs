//! The two externally produced inputs: per-partition resource usage and the
//! partition interconnect graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A kind of fabric resource counted by synthesis.
///
/// Only [`ResourceKind::Lut`] feeds area estimation; the rest are carried so a
/// report round-trips without loss.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Logic cells (look-up tables).
    Lut,
    /// Flip-flops.
    Register,
    /// Block memories.
    Bram,
    /// DSP slices.
    Dsp,
    /// Any other report column, by its report name.
    Other(String),
}

/// Partition name to resource counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsageMap {
    usage: BTreeMap<String, BTreeMap<ResourceKind, f64>>,
}

impl ResourceUsageMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one count, returning the value it replaced.
    pub fn set(&mut self, partition: &str, kind: ResourceKind, value: f64) -> Option<f64> {
        self.usage
            .entry(partition.to_string())
            .or_default()
            .insert(kind, value)
    }

    /// Returns one count.
    pub fn get(&self, partition: &str, kind: &ResourceKind) -> Option<f64> {
        self.usage.get(partition).and_then(|m| m.get(kind)).copied()
    }

    /// Returns the logic-cell count of a partition.
    pub fn luts(&self, partition: &str) -> Option<f64> {
        self.get(partition, &ResourceKind::Lut)
    }

    /// Iterates over partition names in sorted order.
    pub fn partitions(&self) -> impl Iterator<Item = &str> {
        self.usage.keys().map(String::as_str)
    }
}

/// A communication channel of one partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name, shared by both endpoints.
    pub name: String,
    /// The partition at the other end; `None` if unassigned.
    pub partner: Option<String>,
}

impl Channel {
    /// Creates a channel to `partner`.
    pub fn to(name: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partner: Some(partner.into()),
        }
    }
}

/// Per-partition channel lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InterconnectGraph {
    channels: BTreeMap<String, Vec<Channel>>,
}

impl InterconnectGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a channel to `partition`'s list.
    pub fn add_channel(&mut self, partition: &str, channel: Channel) {
        self.channels
            .entry(partition.to_string())
            .or_default()
            .push(channel);
    }

    /// Returns a partition's channels.
    pub fn channels(&self, partition: &str) -> &[Channel] {
        self.channels.get(partition).map_or(&[], Vec::as_slice)
    }

    /// Counts distinct channels directly between `a` and `b`.
    ///
    /// A channel listed by both endpoints counts once.
    pub fn channels_between(&self, a: &str, b: &str) -> usize {
        self.names_towards(a, b)
            .chain(self.names_towards(b, a))
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn names_towards<'a>(&'a self, from: &str, to: &'a str) -> impl Iterator<Item = &'a str> {
        self.channels(from)
            .iter()
            .filter(move |c| c.partner.as_deref() == Some(to))
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_replaced_value() {
        let mut usage = ResourceUsageMap::new();
        assert_eq!(usage.set("dram", ResourceKind::Lut, 800.0), None);
        assert_eq!(usage.set("dram", ResourceKind::Lut, 400.0), Some(800.0));
        assert_eq!(usage.luts("dram"), Some(400.0));
        assert_eq!(usage.luts("pcie"), None);
    }

    #[test]
    fn channels_counted_once_per_name() {
        let mut graph = InterconnectGraph::new();
        graph.add_channel("a", Channel::to("req", "b"));
        graph.add_channel("a", Channel::to("resp", "b"));
        graph.add_channel("b", Channel::to("req", "a"));
        graph.add_channel("a", Channel::to("dbg", "c"));
        graph.add_channel(
            "a",
            Channel {
                name: "loose".into(),
                partner: None,
            },
        );
        assert_eq!(graph.channels_between("a", "b"), 2);
        assert_eq!(graph.channels_between("b", "a"), 2);
        assert_eq!(graph.channels_between("a", "c"), 1);
        assert_eq!(graph.channels_between("b", "c"), 0);
    }
}
