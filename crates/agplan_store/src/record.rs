//! The persisted shape of a solved floorplan.

use agplan_common::{Dimensions, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key marking a partition as an unoccupied hole in the fabric.
pub const HOLE_ATTRIBUTE: &str = "EMPTYBOX";

/// One solved partition as the directive emitter sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredPartition {
    /// Unique partition name.
    pub name: String,
    /// Hierarchical instance path; `None` means "placed, but emit no directive".
    pub source_path: Option<String>,
    /// Net area in placement units.
    pub area: f64,
    /// Resolved center.
    pub center: Point,
    /// Resolved shape.
    pub shape: Dimensions,
    /// String attributes carried through from the constraint records.
    pub attributes: BTreeMap<String, String>,
    /// Parent partition name.
    pub parent: Option<String>,
    /// Child partition names, sorted.
    pub children: Vec<String>,
}

impl StoredPartition {
    /// Returns `false` if the emitter must skip this partition.
    pub fn emits_directive(&self) -> bool {
        self.source_path.is_some()
    }

    /// Returns `true` if this partition only reserves unusable fabric.
    pub fn is_hole(&self) -> bool {
        self.attributes.contains_key(HOLE_ATTRIBUTE)
    }

    /// Lower-left corner of the resolved rectangle.
    pub fn lower_left(&self) -> Point {
        self.shape.lower_left(self.center)
    }

    /// Upper-right corner of the resolved rectangle.
    pub fn upper_right(&self) -> Point {
        self.shape.upper_right(self.center)
    }
}

/// A solved floorplan: the chip extent plus every partition, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorplanResult {
    /// Fabric extent the partitions were placed in.
    pub chip: Dimensions,
    /// Solved partitions, keyed by name.
    pub partitions: BTreeMap<String, StoredPartition>,
}

impl FloorplanResult {
    /// Returns the partition with the given name.
    pub fn get(&self, name: &str) -> Option<&StoredPartition> {
        self.partitions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(name: &str, path: Option<&str>) -> StoredPartition {
        StoredPartition {
            name: name.to_string(),
            source_path: path.map(str::to_string),
            area: 100.0,
            center: Point::new(20.0, 30.0),
            shape: Dimensions::new(10.0, 8.0),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn corners_from_center_and_shape() {
        let p = partition("a", Some("top/a"));
        assert_eq!(p.lower_left(), Point::new(15.0, 26.0));
        assert_eq!(p.upper_right(), Point::new(25.0, 34.0));
    }

    #[test]
    fn pathless_partition_emits_nothing() {
        let mut result = FloorplanResult::default();
        result.partitions.insert("a".into(), partition("a", Some("top/a")));
        result.partitions.insert("b".into(), partition("b", None));
        assert!(result.get("a").unwrap().emits_directive());
        assert!(!result.get("b").unwrap().emits_directive());
        assert!(result.get("c").is_none());
    }

    #[test]
    fn hole_attribute() {
        let mut p = partition("io_gap", None);
        assert!(!p.is_hole());
        p.attributes.insert(HOLE_ATTRIBUTE.to_string(), "1".to_string());
        assert!(p.is_hole());
    }
}
