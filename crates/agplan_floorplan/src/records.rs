//! Typed constraint records, as produced by the constraint-file parser.

use agplan_common::{Dimensions, Point};
use agplan_diagnostics::RecordRef;
use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;

/// One parsed constraint. Records are applied in list order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstraintRecord {
    /// Fabric extent. Exactly one per build.
    ChipSize {
        /// Fabric width and height.
        size: Dimensions,
    },
    /// Pins a partition to one shape.
    Size {
        /// Partition name.
        name: String,
        /// The only candidate shape.
        size: Dimensions,
    },
    /// Overrides one resource count.
    Resource {
        /// Partition name.
        name: String,
        /// Counted resource.
        kind: ResourceKind,
        /// New count.
        value: f64,
    },
    /// Pins a partition's center.
    Location {
        /// Partition name.
        name: String,
        /// Fixed center.
        center: Point,
    },
    /// Lower-left corner of a pinned region.
    LowerLeft {
        /// Partition name.
        name: String,
        /// Corner position.
        corner: Point,
    },
    /// Upper-right corner of a pinned region.
    UpperRight {
        /// Partition name.
        name: String,
        /// Corner position.
        corner: Point,
    },
    /// Sets a string attribute.
    Attribute {
        /// Partition name.
        name: String,
        /// Attribute key.
        key: String,
        /// Attribute value.
        value: String,
    },
    /// Sets the hierarchical instance path.
    Path {
        /// Partition name.
        name: String,
        /// Instance path.
        path: String,
    },
    /// Declares `child` as belonging to `parent`.
    Relationship {
        /// Enclosing partition.
        parent: String,
        /// Enclosed partition.
        child: String,
    },
}

impl ConstraintRecord {
    /// Short kind name used in diagnostics and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintRecord::ChipSize { .. } => "ChipSize",
            ConstraintRecord::Size { .. } => "Size",
            ConstraintRecord::Resource { .. } => "Resource",
            ConstraintRecord::Location { .. } => "Location",
            ConstraintRecord::LowerLeft { .. } => "LowerLeft",
            ConstraintRecord::UpperRight { .. } => "UpperRight",
            ConstraintRecord::Attribute { .. } => "Attribute",
            ConstraintRecord::Path { .. } => "Path",
            ConstraintRecord::Relationship { .. } => "Relationship",
        }
    }

    /// Returns a reference to this record for diagnostics.
    pub fn at(&self, index: usize) -> RecordRef {
        RecordRef::new(index, self.kind())
    }
}
