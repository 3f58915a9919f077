//! Pairwise communication weights.

use agplan_config::WeightSettings;
use std::collections::BTreeMap;

use crate::ids::PartitionId;
use crate::partition::PartitionSet;
use crate::resources::InterconnectGraph;

/// Symmetric weights keyed by unordered partition pair.
///
/// A pair without an entry weighs nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<(PartitionId, PartitionId), f64>,
}

fn key(a: PartitionId, b: PartitionId) -> (PartitionId, PartitionId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl WeightTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of a pair, in either order.
    pub fn set(&mut self, a: PartitionId, b: PartitionId, weight: f64) {
        self.weights.insert(key(a, b), weight);
    }

    /// Returns the weight of a pair, in either order.
    pub fn weight(&self, a: PartitionId, b: PartitionId) -> f64 {
        self.weights.get(&key(a, b)).copied().unwrap_or(0.0)
    }

    /// Returns the number of weighted pairs.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if no pair is weighted.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Returns every unordered pair that needs a non-overlap constraint, in name
/// order. Two holes never do.
pub fn eligible_pairs(set: &PartitionSet) -> Vec<(PartitionId, PartitionId)> {
    let ids = set.ids();
    let mut pairs = Vec::new();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if !(set.get(a).is_hole() && set.get(b).is_hole()) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Derives the weight of every eligible pair.
///
/// A pair involving a hole weighs 0. Otherwise the weight is `base`, plus
/// `per_channel` for every channel between them when both are top-level,
/// multiplied by `parent_child_multiplier` when one encloses the other.
pub fn estimate_weights(
    set: &PartitionSet,
    graph: &InterconnectGraph,
    settings: &WeightSettings,
) -> WeightTable {
    let mut table = WeightTable::new();
    for (a, b) in eligible_pairs(set) {
        let (pa, pb) = (set.get(a), set.get(b));
        let weight = if pa.is_hole() || pb.is_hole() {
            0.0
        } else {
            let mut w = settings.base;
            if pa.is_top_level() && pb.is_top_level() {
                w += settings.per_channel * graph.channels_between(&pa.name, &pb.name) as f64;
            }
            if set.are_related(a, b) {
                w *= settings.parent_child_multiplier;
            }
            w
        };
        table.set(a, b, weight);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Channel;
    use agplan_store::HOLE_ATTRIBUTE;

    fn set_of(names: &[&str]) -> PartitionSet {
        let mut set = PartitionSet::new();
        for name in names {
            set.get_or_insert(name);
        }
        set
    }

    fn id(set: &PartitionSet, name: &str) -> PartitionId {
        set.find(name).unwrap()
    }

    fn make_hole(set: &mut PartitionSet, name: &str) {
        let id = id(set, name);
        set.get_mut(id)
            .attributes
            .insert(HOLE_ATTRIBUTE.into(), "1".into());
    }

    #[test]
    fn base_weight_without_channels() {
        let set = set_of(&["a", "b"]);
        let table = estimate_weights(&set, &InterconnectGraph::new(), &WeightSettings::default());
        assert_eq!(table.weight(id(&set, "a"), id(&set, "b")), 1.0);
        assert_eq!(table.weight(id(&set, "b"), id(&set, "a")), 1.0);
    }

    #[test]
    fn channels_between_top_level_partitions() {
        let set = set_of(&["a", "b"]);
        let mut graph = InterconnectGraph::new();
        graph.add_channel("a", Channel::to("req", "b"));
        graph.add_channel("b", Channel::to("resp", "a"));
        let table = estimate_weights(&set, &graph, &WeightSettings::default());
        assert_eq!(table.weight(id(&set, "a"), id(&set, "b")), 21.0);
    }

    #[test]
    fn parent_child_multiplied() {
        let mut set = set_of(&["top", "dram", "pcie"]);
        set.link(id(&set, "top"), id(&set, "dram")).unwrap();
        let mut graph = InterconnectGraph::new();
        graph.add_channel("top", Channel::to("mem", "dram"));
        graph.add_channel("top", Channel::to("io", "pcie"));
        let table = estimate_weights(&set, &graph, &WeightSettings::default());
        // Channels only count between top-level partitions.
        assert_eq!(table.weight(id(&set, "top"), id(&set, "dram")), 100.0);
        assert_eq!(table.weight(id(&set, "top"), id(&set, "pcie")), 11.0);
        assert_eq!(table.weight(id(&set, "dram"), id(&set, "pcie")), 1.0);
    }

    #[test]
    fn holes_weigh_nothing_and_pair_of_holes_is_excluded() {
        let mut set = set_of(&["a", "gap1", "gap2"]);
        make_hole(&mut set, "gap1");
        make_hole(&mut set, "gap2");
        let pairs = eligible_pairs(&set);
        assert_eq!(pairs.len(), 2);
        assert!(!pairs.contains(&(id(&set, "gap1"), id(&set, "gap2"))));
        let table = estimate_weights(&set, &InterconnectGraph::new(), &WeightSettings::default());
        assert_eq!(table.len(), 2);
        assert_eq!(table.weight(id(&set, "a"), id(&set, "gap1")), 0.0);
    }
}
