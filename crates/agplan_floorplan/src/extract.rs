//! Solution read-back and validation.

use agplan_common::{Dimensions, Point};
use agplan_mip::{Assignment, Solution, VarId};
use agplan_store::{FloorplanResult, StoredPartition};
use log::{debug, error};

use crate::error::InfeasibleModelError;
use crate::hierarchy::Hierarchy;
use crate::model_builder::PlacementModel;
use crate::partition::PartitionSet;

/// Writes resolved centers and shapes back into `set`.
///
/// Fails without touching `set` if the solve did not succeed or if any
/// resolved center coordinate is below `threshold`.
pub fn extract_solution(
    placement: &PlacementModel,
    solution: &Solution,
    set: &mut PartitionSet,
    threshold: f64,
) -> Result<(), InfeasibleModelError> {
    let assignment = match (&solution.assignment, solution.status.is_success()) {
        (Some(assignment), true) => assignment,
        _ => {
            error!("solve failed: {}", solution.status);
            return Err(InfeasibleModelError::Status {
                status: solution.status.clone(),
            });
        }
    };

    let mut resolved = Vec::with_capacity(placement.partitions.len());
    for vars in &placement.partitions {
        let center = Point::new(assignment.eval(&vars.x), assignment.eval(&vars.y));
        if center.x < threshold || center.y < threshold {
            let dump = assignment.named(&placement.model);
            for (name, value) in &dump {
                error!("  {name} = {value}");
            }
            return Err(InfeasibleModelError::Degenerate {
                partition: set.get(vars.id).name.clone(),
                x: center.x,
                y: center.y,
                assignment: dump,
            });
        }
        let shape = Dimensions::new(assignment.eval(&vars.width), assignment.eval(&vars.height));
        let choice = selected_shape(assignment, &vars.selectors).unwrap_or(0);
        resolved.push((vars.id, center, shape, choice));
    }

    for (id, center, shape, choice) in resolved {
        let p = set.get_mut(id);
        debug!(
            "`{}` at ({}, {}) size {}x{} (candidate {choice})",
            p.name, center.x, center.y, shape.width, shape.height
        );
        p.location = Some(center);
        p.resolved_shape = Some(shape);
    }
    Ok(())
}

/// Returns the index of the selected candidate shape of a partition.
pub fn selected_shape(assignment: &Assignment, selectors: &[VarId]) -> Option<usize> {
    selectors
        .iter()
        .enumerate()
        .max_by(|x, y| assignment.value(*x.1).total_cmp(&assignment.value(*y.1)))
        .map(|(i, _)| i)
}

impl Hierarchy {
    /// Converts the solved hierarchy into its persisted form.
    pub fn to_result(&self) -> FloorplanResult {
        let set = &self.partitions;
        let partitions = set
            .iter()
            .map(|(id, p)| {
                let stored = StoredPartition {
                    name: p.name.clone(),
                    source_path: p.source_path.clone(),
                    area: p.area,
                    center: p.location.unwrap_or_default(),
                    shape: p
                        .resolved_shape
                        .or_else(|| p.candidate_shapes.first().copied())
                        .unwrap_or_default(),
                    attributes: p.attributes.clone(),
                    parent: p.parent.map(|parent| set.get(parent).name.clone()),
                    children: set.child_names(id),
                };
                (p.name.clone(), stored)
            })
            .collect();
        FloorplanResult {
            chip: self.chip,
            partitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_builder::build_model;
    use crate::weights::WeightTable;
    use agplan_mip::SolveStatus;

    fn two_squares() -> (PartitionSet, PlacementModel) {
        let mut set = PartitionSet::new();
        for (name, side) in [("a", 20.0), ("b", 10.0)] {
            let (id, _) = set.get_or_insert(name);
            set.get_mut(id).candidate_shapes = vec![Dimensions::new(side, side)];
        }
        let pm = build_model(&set, Dimensions::new(100.0, 100.0), &WeightTable::new());
        (set, pm)
    }

    fn assignment_with(pm: &PlacementModel, values: &[(&str, f64)]) -> Assignment {
        let mut raw = vec![0.0; pm.model.var_count()];
        for &(name, value) in values {
            raw[pm.model.find_var(name).unwrap().index()] = value;
        }
        Assignment::new(raw)
    }

    #[test]
    fn writes_back_centers_and_shapes() {
        let (mut set, pm) = two_squares();
        let assignment = assignment_with(
            &pm,
            &[("xloc_a", 10.0), ("yloc_a", 10.0), ("xloc_b", 25.0), ("yloc_b", 5.0)],
        );
        let solution = Solution {
            status: SolveStatus::Optimal,
            assignment: Some(assignment),
        };
        extract_solution(&pm, &solution, &mut set, 1.0).unwrap();
        let b = set.get(set.find("b").unwrap());
        assert_eq!(b.location, Some(Point::new(25.0, 5.0)));
        assert_eq!(b.resolved_shape, Some(Dimensions::new(10.0, 10.0)));
    }

    #[test]
    fn degenerate_center_aborts_with_dump() {
        let (mut set, pm) = two_squares();
        let assignment = assignment_with(&pm, &[("xloc_a", 0.5), ("yloc_a", 10.0)]);
        let solution = Solution {
            status: SolveStatus::Feasible,
            assignment: Some(assignment),
        };
        let err = extract_solution(&pm, &solution, &mut set, 1.0).unwrap_err();
        match err {
            InfeasibleModelError::Degenerate {
                partition,
                x,
                assignment,
                ..
            } => {
                assert_eq!(partition, "a");
                assert_eq!(x, 0.5);
                assert_eq!(assignment.len(), pm.model.var_count());
                assert!(assignment.contains(&("xloc_a".to_string(), 0.5)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(set.get(set.find("a").unwrap()).location.is_none());
    }

    #[test]
    fn failed_status_aborts() {
        let (mut set, pm) = two_squares();
        let solution = Solution::without_assignment(SolveStatus::Infeasible);
        let err = extract_solution(&pm, &solution, &mut set, 1.0).unwrap_err();
        assert!(matches!(
            err,
            InfeasibleModelError::Status {
                status: SolveStatus::Infeasible
            }
        ));
    }

    #[test]
    fn selected_shape_picks_set_selector() {
        let a = Assignment::new(vec![0.0, 1.0, 0.0]);
        let selectors: Vec<VarId> = (0..3).map(VarId::from_raw).collect();
        assert_eq!(selected_shape(&a, &selectors), Some(1));
        assert_eq!(selected_shape(&a, &[]), None);
    }
}
