//! Pure-Rust branch and bound through `good_lp`'s `microlp` solver.

use super::{constraint, declare, expression, read_assignment, status_of};
use crate::error::MipError;
use crate::model::MipModel;
use crate::solver::{MipSolver, Solution, SolveLimits, SolveStatus, TIME_LIMIT_REASON};
use good_lp::solvers::microlp::microlp;
use good_lp::SolverModel;
use log::{debug, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

/// The default backend.
///
/// `microlp` has no node or gap controls and searches to proven optimality.
/// The search runs on a worker thread and the call returns
/// [`SolveStatus::Failed`] with [`TIME_LIMIT_REASON`] once
/// `limits.time_limit` passes. An abandoned search cannot be interrupted; it
/// keeps its thread until it finishes or the process exits.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicroLpSolver;

impl MipSolver for MicroLpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<Solution, MipError> {
        model.validate()?;
        debug!(
            "microlp: {} vars ({} binary), {} constraints; cap {:?}, node budget and gap not supported",
            model.var_count(),
            model.binary_count(),
            model.constraint_count(),
            limits.time_limit
        );

        let owned = model.clone();
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("agplan-microlp".into())
            .spawn(move || {
                // the receiver is gone once the deadline has passed
                let _ = tx.send(solve_to_optimality(&owned));
            })
            .map_err(MipError::Spawn)?;

        Ok(match rx.recv_timeout(limits.time_limit) {
            Ok(solution) => solution,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "microlp: no answer within {:?}, abandoning the search",
                    limits.time_limit
                );
                Solution::without_assignment(SolveStatus::Failed(TIME_LIMIT_REASON.into()))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Solution::without_assignment(SolveStatus::Failed("solver thread panicked".into()))
            }
        })
    }
}

fn solve_to_optimality(model: &MipModel) -> Solution {
    let (vars, handles) = declare(model);
    let mut problem = vars
        .minimise(expression(&model.objective, &handles))
        .using(microlp);
    for c in &model.constraints {
        problem = problem.with(constraint(c, &handles));
    }
    match problem.solve() {
        Ok(solution) => Solution {
            status: SolveStatus::Optimal,
            assignment: Some(read_assignment(&solution, &handles)),
        },
        Err(err) => Solution::without_assignment(status_of(err)),
    }
}
