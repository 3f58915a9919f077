//! The solver contract: limits in, status and assignment out.

use crate::error::MipError;
use crate::ids::VarId;
use crate::model::{LinearExpr, MipModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Bounds on a single solve.
///
/// A wide `mip_gap` trades optimality for turnaround: the caller re-solves on
/// every build and prefers a near-optimal answer now over an exact one later.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveLimits {
    /// Wall-clock cap.
    pub time_limit: Duration,
    /// Branch-and-bound node budget.
    pub iteration_limit: u32,
    /// Accepted relative optimality gap in `[0, 1]`.
    pub mip_gap: f64,
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            iteration_limit: 10_000,
            mip_gap: 0.95,
        }
    }
}

/// Reason carried by [`SolveStatus::Failed`] when the wall-clock cap passed.
pub const TIME_LIMIT_REASON: &str = "time limit";

/// Outcome reported by a backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// A feasible point within the limits, optimality not proven.
    Feasible,
    /// No feasible point exists.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// The backend gave up for another reason.
    Failed(String),
}

impl SolveStatus {
    /// Returns `true` if the solve produced a usable assignment.
    pub fn is_success(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Feasible => write!(f, "feasible"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Values for every model variable, indexed by [`VarId`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Wraps raw values; `values[i]` belongs to `VarId::from_raw(i)`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Returns the value of one variable.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to the solved model.
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }

    /// Evaluates an expression under this assignment.
    pub fn eval(&self, expr: &LinearExpr) -> f64 {
        expr.eval_with(|v| self.value(v))
    }

    /// Returns the number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variables are assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pairs every value with its variable name, in declaration order.
    pub fn named(&self, model: &MipModel) -> Vec<(String, f64)> {
        model
            .vars
            .iter()
            .zip(&self.values)
            .map(|(def, &value)| (def.name.clone(), value))
            .collect()
    }
}

/// The result of a solve.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Backend status.
    pub status: SolveStatus,
    /// Variable values; present only when `status.is_success()`.
    pub assignment: Option<Assignment>,
}

impl Solution {
    /// Builds a solution without an assignment.
    pub fn without_assignment(status: SolveStatus) -> Self {
        Self {
            status,
            assignment: None,
        }
    }
}

/// A mixed-integer backend.
///
/// Implementations must leave the model untouched and must return an
/// assignment covering every variable whenever the status is a success.
pub trait MipSolver {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Solves `model` within `limits`.
    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<Solution, MipError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_success() {
        assert!(SolveStatus::Optimal.is_success());
        assert!(SolveStatus::Feasible.is_success());
        assert!(!SolveStatus::Infeasible.is_success());
        assert!(!SolveStatus::Failed("x".into()).is_success());
    }

    #[test]
    fn status_display() {
        assert_eq!(SolveStatus::Infeasible.to_string(), "infeasible");
        assert_eq!(
            SolveStatus::Failed("node limit".into()).to_string(),
            "failed: node limit"
        );
    }

    #[test]
    fn assignment_eval_and_names() {
        let mut model = MipModel::new();
        let x = model.add_continuous("x", None, None);
        let y = model.add_binary("y");
        let a = Assignment::new(vec![2.5, 1.0]);
        assert_eq!(a.value(x), 2.5);
        let e = LinearExpr::term(x, 2.0) + LinearExpr::var(y) + 1.0;
        assert_eq!(a.eval(&e), 7.0);
        assert_eq!(
            a.named(&model),
            vec![("x".to_string(), 2.5), ("y".to_string(), 1.0)]
        );
    }
}
