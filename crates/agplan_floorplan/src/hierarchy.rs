//! Hierarchy construction: merges the resource report and the constraint
//! records into a partition forest.
//!
//! Records are applied strictly in list order. A relationship is checked
//! against the tree as it stands when the record is reached, so the same
//! records in a different order may be rejected.

use agplan_common::{Dimensions, Point};
use agplan_diagnostics::{DiagnosticSink, RecordRef};
use log::debug;

use crate::codes;
use crate::error::ConfigError;
use crate::ids::PartitionId;
use crate::partition::{CornerPin, LinkConflict, PartitionSet};
use crate::records::ConstraintRecord;
use crate::resources::ResourceUsageMap;

/// The partition forest plus the inputs later stages read from.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    /// Fabric extent.
    pub chip: Dimensions,
    /// All partitions.
    pub partitions: PartitionSet,
    /// Resource usage after Resource record overrides.
    pub usage: ResourceUsageMap,
}

/// Builds the partition forest.
///
/// Every partition with a nonzero logic-cell count in `report` is created up
/// front; records may introduce further partitions. Recoverable oddities go to
/// `sink`.
pub fn build_hierarchy(
    report: &ResourceUsageMap,
    records: &[ConstraintRecord],
    sink: &DiagnosticSink,
) -> Result<Hierarchy, ConfigError> {
    let mut partitions = PartitionSet::new();
    let mut usage = report.clone();
    for name in report.partitions() {
        if report.luts(name).is_some_and(|luts| luts > 0.0) {
            partitions.get_or_insert(name);
        }
    }

    let mut chip: Option<(Dimensions, RecordRef)> = None;
    for (index, record) in records.iter().enumerate() {
        let at = record.at(index);
        match record {
            ConstraintRecord::ChipSize { size } => {
                if let Some((_, first)) = &chip {
                    return Err(ConfigError::DuplicateChipSize {
                        record: at,
                        first: first.clone(),
                    });
                }
                check_positive(*size, "chip", &at)?;
                chip = Some((*size, at));
            }
            ConstraintRecord::Size { name, size } => {
                check_positive(*size, name, &at)?;
                let (id, _) = partitions.get_or_insert(name);
                partitions.get_mut(id).fixed_shape = Some(*size);
            }
            ConstraintRecord::Resource { name, kind, value } => {
                partitions.get_or_insert(name);
                if let Some(old) = usage.set(name, kind.clone(), *value) {
                    if old != *value {
                        sink.emit(codes::warn_resource_override(name, at, old, *value));
                    }
                }
            }
            ConstraintRecord::Location { name, center } => {
                let id = insert_reported(&mut partitions, name, at, sink);
                partitions.get_mut(id).pin_location(*center);
            }
            ConstraintRecord::LowerLeft { name, corner } => {
                let (id, _) = partitions.get_or_insert(name);
                partitions.get_mut(id).lower_left = Some(CornerPin {
                    point: *corner,
                    record: at,
                });
            }
            ConstraintRecord::UpperRight { name, corner } => {
                let (id, _) = partitions.get_or_insert(name);
                partitions.get_mut(id).upper_right = Some(CornerPin {
                    point: *corner,
                    record: at,
                });
            }
            ConstraintRecord::Attribute { name, key, value } => {
                let id = insert_reported(&mut partitions, name, at, sink);
                partitions
                    .get_mut(id)
                    .attributes
                    .insert(key.clone(), value.clone());
            }
            ConstraintRecord::Path { name, path } => {
                let id = insert_reported(&mut partitions, name, at, sink);
                partitions.get_mut(id).source_path = Some(path.clone());
            }
            ConstraintRecord::Relationship { parent, child } => {
                relate(&mut partitions, parent, child, at, sink)?;
            }
        }
    }

    let (chip, _) = chip.ok_or(ConfigError::MissingChipSize)?;
    apply_corners(&mut partitions, sink)?;
    debug!(
        "hierarchy: {} partitions on a {}x{} chip",
        partitions.len(),
        chip.width,
        chip.height
    );
    Ok(Hierarchy {
        chip,
        partitions,
        usage,
    })
}

fn check_positive(size: Dimensions, name: &str, at: &RecordRef) -> Result<(), ConfigError> {
    if size.width > 0.0 && size.height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSize {
            record: at.clone(),
            name: name.to_string(),
            width: size.width,
            height: size.height,
        })
    }
}

fn insert_reported(
    partitions: &mut PartitionSet,
    name: &str,
    at: RecordRef,
    sink: &DiagnosticSink,
) -> PartitionId {
    let (id, created) = partitions.get_or_insert(name);
    if created {
        sink.emit(codes::warn_unreported_partition(name, at));
    }
    id
}

fn relate(
    partitions: &mut PartitionSet,
    parent: &str,
    child: &str,
    at: RecordRef,
    sink: &DiagnosticSink,
) -> Result<(), ConfigError> {
    let parent_id = insert_reported(partitions, parent, at.clone(), sink);
    let child_id = insert_reported(partitions, child, at.clone(), sink);
    partitions
        .link(parent_id, child_id)
        .map_err(|conflict| match conflict {
            LinkConflict::SelfLink => ConfigError::SelfRelationship {
                record: at.clone(),
                name: child.to_string(),
            },
            LinkConflict::ChildHasParent(existing) => ConfigError::AlreadyHasParent {
                record: at.clone(),
                child: child.to_string(),
                parent: partitions.get(existing).name.clone(),
            },
            LinkConflict::ChildHasChildren => ConfigError::ChildHasChildren {
                record: at.clone(),
                child: child.to_string(),
            },
            LinkConflict::ParentHasParent(grandparent) => ConfigError::ParentHasParent {
                record: at.clone(),
                parent: parent.to_string(),
                grandparent: partitions.get(grandparent).name.clone(),
            },
        })
}

/// Turns a lower-left/upper-right pair into a pinned shape and center.
fn apply_corners(partitions: &mut PartitionSet, sink: &DiagnosticSink) -> Result<(), ConfigError> {
    for id in partitions.ids() {
        let p = partitions.get_mut(id);
        match (p.lower_left.clone(), p.upper_right.clone()) {
            (Some(ll), Some(ur)) => {
                if ur.point.x <= ll.point.x || ur.point.y <= ll.point.y {
                    return Err(ConfigError::DegenerateCorners {
                        record: ur.record,
                        name: p.name.clone(),
                    });
                }
                if p.location_pinned {
                    sink.emit(codes::warn_location_superseded(&p.name, ur.record));
                }
                p.fixed_shape = Some(Dimensions::new(
                    ur.point.x - ll.point.x,
                    ur.point.y - ll.point.y,
                ));
                p.pin_location(Point::new(
                    0.5 * (ll.point.x + ur.point.x),
                    0.5 * (ll.point.y + ur.point.y),
                ));
            }
            (Some(ll), None) => {
                sink.emit(codes::warn_lone_corner(&p.name, ll.record, "upper-right"));
            }
            (None, Some(ur)) => {
                sink.emit(codes::warn_lone_corner(&p.name, ur.record, "lower-left"));
            }
            (None, None) => {}
        }
    }
    Ok(())
}
