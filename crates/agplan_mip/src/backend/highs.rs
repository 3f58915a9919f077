//! HiGHS through `good_lp`, honoring the solve limits.

use super::{constraint, declare, expression, read_assignment, status_of};
use crate::error::MipError;
use crate::model::MipModel;
use crate::solver::{MipSolver, Solution, SolveLimits, SolveStatus};
use good_lp::solvers::highs::highs;
use good_lp::SolverModel;
use log::debug;

/// HiGHS backend, available with the `highs` feature.
///
/// Applies the wall-clock cap, the node budget, and the relative gap, and keeps
/// the solver's console output off. A successful answer is reported as
/// [`SolveStatus::Feasible`] since the limits may stop the search early.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighsSolver;

impl MipSolver for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<Solution, MipError> {
        model.validate()?;
        debug!(
            "highs: {} vars ({} binary), {} constraints, limits {limits:?}",
            model.var_count(),
            model.binary_count(),
            model.constraint_count()
        );

        let (vars, handles) = declare(model);
        let mut problem = vars
            .minimise(expression(&model.objective, &handles))
            .using(highs)
            .set_verbose(false)
            .set_option("time_limit", limits.time_limit.as_secs_f64())
            .set_option("mip_rel_gap", limits.mip_gap)
            .set_option("mip_max_nodes", limits.iteration_limit.min(i32::MAX as u32) as i32);
        for c in &model.constraints {
            problem = problem.with(constraint(c, &handles));
        }

        Ok(match problem.solve() {
            Ok(solution) => Solution {
                status: SolveStatus::Feasible,
                assignment: Some(read_assignment(&solution, &handles)),
            },
            Err(err) => Solution::without_assignment(status_of(err)),
        })
    }
}
