//! Area estimation and candidate shape generation.

use agplan_common::Dimensions;
use agplan_config::AreaSettings;
use log::debug;

use crate::error::{ConfigError, FloorplanError};
use crate::hierarchy::Hierarchy;
use crate::ids::PartitionId;

/// Computes every partition's net area and candidate shapes.
///
/// Gross area comes from a nonzero logic-cell count when one is reported,
/// otherwise from the pinned shape. A parent's net area is its gross area minus its
/// children's gross areas and must stay positive. Partitions without a pinned
/// shape get one candidate per aspect-ratio coefficient.
pub fn estimate_areas(hierarchy: &mut Hierarchy, settings: &AreaSettings) -> Result<(), FloorplanError> {
    let ids = hierarchy.partitions.ids();
    for &id in &ids {
        let p = hierarchy.partitions.get_mut(id);
        let luts = hierarchy.usage.luts(&p.name).filter(|&l| l > 0.0);
        let gross = match (luts, p.fixed_shape) {
            (Some(luts), _) => luts / settings.luts_per_slice,
            (None, Some(shape)) => shape.area(),
            (None, None) => {
                return Err(FloorplanError::MissingResource {
                    partition: p.name.clone(),
                })
            }
        };
        p.gross_area = gross;
        p.area = gross;
    }

    for &id in &ids {
        subtract_children(hierarchy, id);
    }

    for &id in &ids {
        let p = hierarchy.partitions.get_mut(id);
        if p.area <= 0.0 || !p.area.is_finite() {
            return Err(ConfigError::NonPositiveArea {
                name: p.name.clone(),
                area: p.area,
                children: p.children.len(),
            }
            .into());
        }
        p.candidate_shapes = match p.fixed_shape {
            Some(shape) => vec![shape],
            None => candidate_shapes(p.area, settings),
        };
    }
    Ok(())
}

fn subtract_children(hierarchy: &mut Hierarchy, id: PartitionId) {
    let set = &mut hierarchy.partitions;
    let children: Vec<PartitionId> = set.get(id).children.iter().copied().collect();
    for child in children {
        let (child_name, child_area) = {
            let c = set.get(child);
            (c.name.clone(), c.gross_area)
        };
        let parent = set.get_mut(id);
        debug!(
            "area of `{}` reduced from {} to {} for child `{}`",
            parent.name,
            parent.area,
            parent.area - child_area,
            child_name
        );
        parent.area -= child_area;
    }
}

/// Generates `(c * sqrt(area) * slack, sqrt(area) / c * slack)` for every
/// coefficient `c`.
pub fn candidate_shapes(area: f64, settings: &AreaSettings) -> Vec<Dimensions> {
    let root = area.sqrt();
    settings
        .aspect_ratios
        .iter()
        .map(|&c| {
            Dimensions::new(
                c * root * settings.slack_factor,
                root / c * settings.slack_factor,
            )
        })
        .collect()
}
