//! Solver-neutral mixed-integer linear programs.
//!
//! A [`MipModel`] is plain data: named variables, linear constraints, and a
//! linear objective to minimize. Any [`MipSolver`] can consume it and return a
//! [`Solution`] holding a status plus an [`Assignment`] of variable values.
//! Backends live in [`backend`]; the default one is pure Rust.
//!
//! # Usage
//!
//! ```ignore
//! use agplan_mip::{Comparison, LinearExpr, MicroLpSolver, MipModel, MipSolver, SolveLimits};
//!
//! let mut model = MipModel::new();
//! let x = model.add_continuous("x", Some(0.0), Some(10.0));
//! model.add_constraint("x_low", LinearExpr::var(x), Comparison::Ge, LinearExpr::constant(3.0));
//! model.minimize(LinearExpr::var(x));
//! let solution = MicroLpSolver.solve(&model, &SolveLimits::default())?;
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod ids;
pub mod model;
pub mod solver;

pub use backend::MicroLpSolver;
#[cfg(feature = "highs")]
pub use backend::HighsSolver;
pub use error::MipError;
pub use ids::{ConstraintId, VarId};
pub use model::{Comparison, Constraint, LinearExpr, MipModel, VarDef, VarKind};
pub use solver::{Assignment, MipSolver, Solution, SolveLimits, SolveStatus, TIME_LIMIT_REASON};
