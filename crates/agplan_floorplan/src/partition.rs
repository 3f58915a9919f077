//! Partition geometry records and the arena that owns them.
//!
//! Parent/child edges are stored as [`PartitionId`]s on both ends. The tree
//! shape is checked once, in [`PartitionSet::link`], so later stages can rely
//! on it: a partition has at most one parent, and never has both a parent and
//! children.

use agplan_common::{Dimensions, Point};
use agplan_diagnostics::RecordRef;
use agplan_store::HOLE_ATTRIBUTE;
use std::collections::{BTreeMap, BTreeSet};

use crate::ids::PartitionId;

/// A corner taken from a LowerLeft or UpperRight record.
#[derive(Clone, Debug, PartialEq)]
pub struct CornerPin {
    /// Corner position.
    pub point: Point,
    /// The record that set it.
    pub record: RecordRef,
}

/// One area group.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Unique name.
    pub name: String,
    /// Hierarchical instance path; `None` means "place it, emit nothing".
    pub source_path: Option<String>,
    /// Net area in placement units, after the children are subtracted.
    pub area: f64,
    /// Area before the children are subtracted.
    pub gross_area: f64,
    /// Shape pinned by a Size record or a pair of corners.
    pub fixed_shape: Option<Dimensions>,
    /// Candidate shapes; filled in by area estimation, never empty afterwards.
    pub candidate_shapes: Vec<Dimensions>,
    /// Center pinned by a constraint, or resolved by the solver.
    pub location: Option<Point>,
    /// `true` if `location` came from a constraint rather than the solver.
    pub location_pinned: bool,
    /// The shape chosen by the solver.
    pub resolved_shape: Option<Dimensions>,
    /// Lower-left corner record, if any.
    pub lower_left: Option<CornerPin>,
    /// Upper-right corner record, if any.
    pub upper_right: Option<CornerPin>,
    /// String attributes.
    pub attributes: BTreeMap<String, String>,
    /// Enclosing partition.
    pub parent: Option<PartitionId>,
    /// Enclosed partitions.
    pub children: BTreeSet<PartitionId>,
}

impl Partition {
    /// Creates a partition with no geometry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_path: None,
            area: 0.0,
            gross_area: 0.0,
            fixed_shape: None,
            candidate_shapes: Vec::new(),
            location: None,
            location_pinned: false,
            resolved_shape: None,
            lower_left: None,
            upper_right: None,
            attributes: BTreeMap::new(),
            parent: None,
            children: BTreeSet::new(),
        }
    }

    /// Returns `true` if this partition marks unusable fabric.
    pub fn is_hole(&self) -> bool {
        self.attributes.contains_key(HOLE_ATTRIBUTE)
    }

    /// Returns `true` for a partition without a parent.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Pins the center.
    pub fn pin_location(&mut self, center: Point) {
        self.location = Some(center);
        self.location_pinned = true;
    }
}

/// Why [`PartitionSet::link`] refused an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkConflict {
    /// Parent and child are the same partition.
    SelfLink,
    /// The child already has this parent.
    ChildHasParent(PartitionId),
    /// The child already has children.
    ChildHasChildren,
    /// The parent already has this parent.
    ParentHasParent(PartitionId),
}

/// Dense arena of partitions with a name index.
#[derive(Clone, Debug, Default)]
pub struct PartitionSet {
    partitions: Vec<Partition>,
    by_name: BTreeMap<String, PartitionId>,
}

impl PartitionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ID of `name`, creating the partition if absent.
    ///
    /// The flag is `true` if the partition was just created.
    pub fn get_or_insert(&mut self, name: &str) -> (PartitionId, bool) {
        if let Some(&id) = self.by_name.get(name) {
            return (id, false);
        }
        let id = PartitionId::for_slot(self.partitions.len());
        self.partitions.push(Partition::new(name));
        self.by_name.insert(name.to_string(), id);
        (id, true)
    }

    /// Looks up a partition by name.
    pub fn find(&self, name: &str) -> Option<PartitionId> {
        self.by_name.get(name).copied()
    }

    /// Returns the partition with the given ID.
    pub fn get(&self, id: PartitionId) -> &Partition {
        &self.partitions[id.index()]
    }

    /// Returns the partition with the given ID, mutably.
    pub fn get_mut(&mut self, id: PartitionId) -> &mut Partition {
        &mut self.partitions[id.index()]
    }

    /// Returns the number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns `true` if there are no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Iterates over all partitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionId, &Partition)> {
        self.by_name.values().map(|&id| (id, self.get(id)))
    }

    /// Returns all IDs in name order.
    pub fn ids(&self) -> Vec<PartitionId> {
        self.by_name.values().copied().collect()
    }

    /// Makes `child` a child of `parent`, enforcing the tree shape.
    pub fn link(&mut self, parent: PartitionId, child: PartitionId) -> Result<(), LinkConflict> {
        if parent == child {
            return Err(LinkConflict::SelfLink);
        }
        if let Some(existing) = self.get(child).parent {
            return Err(LinkConflict::ChildHasParent(existing));
        }
        if !self.get(child).children.is_empty() {
            return Err(LinkConflict::ChildHasChildren);
        }
        if let Some(grandparent) = self.get(parent).parent {
            return Err(LinkConflict::ParentHasParent(grandparent));
        }
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.insert(child);
        Ok(())
    }

    /// Returns `true` if one of `a` and `b` is the parent of the other.
    pub fn are_related(&self, a: PartitionId, b: PartitionId) -> bool {
        self.get(a).parent == Some(b) || self.get(b).parent == Some(a)
    }

    /// Names of a partition's children, sorted.
    pub fn child_names(&self, id: PartitionId) -> Vec<String> {
        let mut names: Vec<String> = self
            .get(id)
            .children
            .iter()
            .map(|&c| self.get(c).name.clone())
            .collect();
        names.sort();
        names
    }
}
