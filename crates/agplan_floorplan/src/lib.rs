//! Area-group floorplanning engine.
//!
//! Assigns non-overlapping rectangles on the fabric to named design
//! partitions. The batch runs in fixed stages:
//!
//! 1. [`build_hierarchy`] merges the resource report and the constraint
//!    records into a partition forest;
//! 2. [`estimate_areas`] derives net areas and candidate shapes;
//! 3. [`estimate_weights`] derives pairwise communication weights;
//! 4. [`build_model`] formulates the mixed-integer placement model;
//! 5. a [`MipSolver`] solves it;
//! 6. [`extract_solution`] validates the answer and writes it back;
//! 7. the result is persisted through a [`ResultStore`].
//!
//! # Usage
//!
//! ```ignore
//! let store = ResultStore::new(build_dir, env!("CARGO_PKG_VERSION"));
//! let solver = solver_for(settings.solver.backend)?;
//! let result = floorplan(&inputs, &settings, solver.as_ref(), &store, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod area;
pub mod codes;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod ids;
pub mod model_builder;
pub mod partition;
pub mod records;
pub mod resources;
pub mod weights;

pub use area::{candidate_shapes, estimate_areas};
pub use error::{ConfigError, FloorplanError, InfeasibleModelError};
pub use extract::extract_solution;
pub use hierarchy::{build_hierarchy, Hierarchy};
pub use ids::PartitionId;
pub use model_builder::{build_model, PairVars, PartitionVars, PlacementModel};
pub use partition::{Partition, PartitionSet};
pub use records::ConstraintRecord;
pub use resources::{Channel, InterconnectGraph, ResourceKind, ResourceUsageMap};
pub use weights::{eligible_pairs, estimate_weights, WeightTable};

use agplan_config::{Settings, SolverBackend};
use agplan_diagnostics::DiagnosticSink;
use agplan_mip::{MicroLpSolver, MipError, MipSolver, SolveLimits};
use agplan_store::{FloorplanResult, ResultStore, ResultVariant};
use log::info;

/// The three external inputs of one batch.
#[derive(Clone, Debug, Default)]
pub struct FloorplanInputs {
    /// Per-partition resource usage from synthesis.
    pub usage: ResourceUsageMap,
    /// Parsed constraint records, in file order.
    pub records: Vec<ConstraintRecord>,
    /// Per-partition channel lists.
    pub interconnect: InterconnectGraph,
}

/// Runs one batch and persists its result as the incomplete variant.
///
/// Any previous incomplete result is removed first, so a failed batch leaves
/// nothing behind.
pub fn floorplan(
    inputs: &FloorplanInputs,
    settings: &Settings,
    solver: &dyn MipSolver,
    store: &ResultStore,
    sink: &DiagnosticSink,
) -> Result<FloorplanResult, FloorplanError> {
    store.invalidate(ResultVariant::Incomplete)?;
    let result = plan(inputs, settings, solver, sink)?;
    store.write(ResultVariant::Incomplete, &result)?;
    Ok(result)
}

/// Runs one batch without persisting it.
pub fn plan(
    inputs: &FloorplanInputs,
    settings: &Settings,
    solver: &dyn MipSolver,
    sink: &DiagnosticSink,
) -> Result<FloorplanResult, FloorplanError> {
    let mut hierarchy = build_hierarchy(&inputs.usage, &inputs.records, sink)?;
    estimate_areas(&mut hierarchy, &settings.area)?;
    if hierarchy.partitions.iter().all(|(_, p)| p.is_hole()) {
        return Err(InfeasibleModelError::NoPlaceablePartitions.into());
    }

    let weights = estimate_weights(&hierarchy.partitions, &inputs.interconnect, &settings.weights);
    let placement = build_model(&hierarchy.partitions, hierarchy.chip, &weights);

    let limits = SolveLimits {
        time_limit: settings.solver.time_limit(),
        iteration_limit: settings.solver.iteration_limit,
        mip_gap: settings.solver.mip_gap,
    };
    info!(
        "solving placement of {} partitions with {} ({} record warnings)",
        hierarchy.partitions.len(),
        solver.name(),
        sink.warning_count()
    );
    let solution = solver.solve(&placement.model, &limits)?;
    extract_solution(
        &placement,
        &solution,
        &mut hierarchy.partitions,
        settings.validation.degenerate_threshold,
    )?;
    sink.emit(codes::note_solved(
        &solution.status.to_string(),
        hierarchy.partitions.len(),
        placement.model.var_count(),
        placement.model.constraint_count(),
    ));
    Ok(hierarchy.to_result())
}

/// Returns the backend selected in the settings.
pub fn solver_for(backend: SolverBackend) -> Result<Box<dyn MipSolver>, MipError> {
    match backend {
        SolverBackend::Microlp => Ok(Box::new(MicroLpSolver)),
        #[cfg(feature = "highs")]
        SolverBackend::Highs => Ok(Box::new(agplan_mip::HighsSolver)),
        #[cfg(not(feature = "highs"))]
        SolverBackend::Highs => Err(MipError::Unavailable(
            "built without the `highs` feature".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_is_available() {
        let solver = solver_for(SolverBackend::Microlp).unwrap();
        assert_eq!(solver.name(), MicroLpSolver.name());
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn highs_requires_feature() {
        assert!(matches!(
            solver_for(SolverBackend::Highs),
            Err(MipError::Unavailable(_))
        ));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let inputs = FloorplanInputs {
            records: vec![ConstraintRecord::ChipSize {
                size: agplan_common::Dimensions::new(50.0, 50.0),
            }],
            ..FloorplanInputs::default()
        };
        let err = plan(&inputs, &Settings::default(), &MicroLpSolver, &DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::Infeasible(InfeasibleModelError::NoPlaceablePartitions)
        ));
    }
}
