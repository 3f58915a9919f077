//! Solver backends built on `good_lp`.
//!
//! Both backends share the translation from [`MipModel`] into `good_lp`
//! variables, expressions, and constraints; they differ only in which
//! solver the problem is handed to and which limits that solver honors.

#[cfg(feature = "highs")]
mod highs;
mod microlp;

#[cfg(feature = "highs")]
pub use self::highs::HighsSolver;
pub use self::microlp::MicroLpSolver;

use crate::model::{Comparison, Constraint, LinearExpr, MipModel, VarKind};
use crate::solver::{Assignment, SolveStatus};
use good_lp::{variable, Expression, ProblemVariables, ResolutionError, Variable};

/// Declares every model variable, returning handles indexed like `model.vars`.
fn declare(model: &MipModel) -> (ProblemVariables, Vec<Variable>) {
    let mut problem = ProblemVariables::new();
    let handles = model
        .vars
        .iter()
        .map(|def| {
            let mut v = variable().name(def.name.clone());
            match def.kind {
                VarKind::Binary => v = v.binary(),
                VarKind::Continuous => {
                    if let Some(lower) = def.lower {
                        v = v.min(lower);
                    }
                    if let Some(upper) = def.upper {
                        v = v.max(upper);
                    }
                }
            }
            problem.add(v)
        })
        .collect();
    (problem, handles)
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut e = Expression::from(expr.constant);
    for &(var, coef) in &expr.terms {
        e += coef * handles[var.index()];
    }
    e
}

fn constraint(c: &Constraint, handles: &[Variable]) -> good_lp::Constraint {
    let lhs = expression(&c.lhs, handles);
    let rhs = expression(&c.rhs, handles);
    match c.cmp {
        Comparison::Le => good_lp::constraint::leq(lhs, rhs),
        Comparison::Ge => good_lp::constraint::geq(lhs, rhs),
        Comparison::Eq => good_lp::constraint::eq(lhs, rhs),
    }
}

fn read_assignment(solution: &impl good_lp::Solution, handles: &[Variable]) -> Assignment {
    Assignment::new(handles.iter().map(|&v| solution.value(v)).collect())
}

fn status_of(err: ResolutionError) -> SolveStatus {
    match err {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        ResolutionError::Unbounded => SolveStatus::Unbounded,
        other => SolveStatus::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VarId;

    #[test]
    fn declare_keeps_declaration_order() {
        let mut model = MipModel::new();
        model.add_continuous("a", Some(0.0), Some(1.0));
        model.add_binary("b");
        model.add_continuous("c", None, None);
        let (_, handles) = declare(&model);
        assert_eq!(handles.len(), 3);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_of(ResolutionError::Infeasible), SolveStatus::Infeasible);
        assert_eq!(status_of(ResolutionError::Unbounded), SolveStatus::Unbounded);
        assert!(matches!(
            status_of(ResolutionError::Str("boom".into())),
            SolveStatus::Failed(_)
        ));
    }

    #[test]
    fn constraint_translates_both_sides() {
        let mut model = MipModel::new();
        let x = model.add_continuous("x", Some(0.0), None);
        let (_, handles) = declare(&model);
        let c = Constraint {
            name: "x_cap".into(),
            lhs: LinearExpr::var(x) + 1.0,
            cmp: Comparison::Le,
            rhs: LinearExpr::constant(4.0),
        };
        let _ = constraint(&c, &handles);
        assert_eq!(x, VarId::from_raw(0));
    }
}
