//! Mixed-integer model data structures.
//!
//! The model is built once by the caller and never mutated by a solver.
//! Variables and constraints are appended in declaration order, so IDs stay
//! stable and iteration order is deterministic.

use crate::error::MipError;
use crate::ids::{ConstraintId, VarId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// The domain class of a variable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VarKind {
    /// A real-valued variable.
    Continuous,
    /// A 0/1 variable.
    Binary,
}

/// A declared model variable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VarDef {
    /// Unique variable name, used in dumps and by backends for debugging.
    pub name: String,
    /// Domain class.
    pub kind: VarKind,
    /// Lower bound, or unbounded below.
    pub lower: Option<f64>,
    /// Upper bound, or unbounded above.
    pub upper: Option<f64>,
}

/// An affine expression `sum(coef * var) + constant`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// `(variable, coefficient)` terms. A variable may appear more than once.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Returns the zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns a constant expression.
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Returns the expression `1 * var`.
    pub fn var(var: VarId) -> Self {
        Self::term(var, 1.0)
    }

    /// Returns the expression `coef * var`.
    pub fn term(var: VarId, coef: f64) -> Self {
        Self {
            terms: vec![(var, coef)],
            constant: 0.0,
        }
    }

    /// Appends `coef * var` in place.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Returns `true` if the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|&(_, c)| c == 0.0)
    }

    /// Iterates over the variables referenced by this expression.
    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.iter().map(|&(v, _)| v)
    }

    /// Evaluates the expression with `value_of` supplying each variable's value.
    pub fn eval_with(&self, value_of: impl Fn(VarId) -> f64) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(v, c)| acc + c * value_of(v))
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::var(var)
    }
}

impl From<f64> for LinearExpr {
    fn from(value: f64) -> Self {
        LinearExpr::constant(value)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Add<f64> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: f64) -> LinearExpr {
        self.constant += rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1.0
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Sub<f64> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: f64) -> LinearExpr {
        self + (-rhs)
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, rhs: f64) -> LinearExpr {
        for (_, c) in &mut self.terms {
            *c *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

/// The relation between a constraint's two sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Comparison {
    /// `lhs <= rhs`
    Le,
    /// `lhs >= rhs`
    Ge,
    /// `lhs == rhs`
    Eq,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
            Comparison::Eq => write!(f, "="),
        }
    }
}

/// A named linear constraint `lhs <cmp> rhs`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Constraint {
    /// Unique constraint name.
    pub name: String,
    /// Left-hand side.
    pub lhs: LinearExpr,
    /// Relation.
    pub cmp: Comparison,
    /// Right-hand side.
    pub rhs: LinearExpr,
}

impl Constraint {
    /// Returns `true` if the constraint holds for the given values within `tolerance`.
    pub fn is_satisfied_with(&self, value_of: impl Fn(VarId) -> f64, tolerance: f64) -> bool {
        let lhs = self.lhs.eval_with(&value_of);
        let rhs = self.rhs.eval_with(&value_of);
        match self.cmp {
            Comparison::Le => lhs <= rhs + tolerance,
            Comparison::Ge => lhs + tolerance >= rhs,
            Comparison::Eq => (lhs - rhs).abs() <= tolerance,
        }
    }
}

/// A mixed-integer linear program to minimize.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MipModel {
    /// All variables, indexed by [`VarId`].
    pub vars: Vec<VarDef>,
    /// All constraints, indexed by [`ConstraintId`].
    pub constraints: Vec<Constraint>,
    /// The expression to minimize.
    pub objective: LinearExpr,
    /// Variable name to ID. Names are unique; see [`MipModel::add_continuous`].
    pub var_by_name: HashMap<String, VarId>,
}

impl MipModel {
    /// Creates an empty model with a zero objective.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a continuous variable with optional bounds and returns its ID.
    ///
    /// A name already in use gets a `#<n>` suffix, so lookups and dumps never
    /// conflate two variables.
    pub fn add_continuous(
        &mut self,
        name: impl Into<String>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> VarId {
        self.add_var(VarDef {
            name: name.into(),
            kind: VarKind::Continuous,
            lower,
            upper,
        })
    }

    /// Declares a binary variable and returns its ID.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_var(VarDef {
            name: name.into(),
            kind: VarKind::Binary,
            lower: Some(0.0),
            upper: Some(1.0),
        })
    }

    fn add_var(&mut self, mut def: VarDef) -> VarId {
        let id = VarId::from_raw(self.vars.len() as u32);
        if self.var_by_name.contains_key(&def.name) {
            def.name = self.unused_name(&def.name, id);
        }
        self.var_by_name.insert(def.name.clone(), id);
        self.vars.push(def);
        id
    }

    /// Adds the constraint `lhs <cmp> rhs` and returns its ID.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        lhs: LinearExpr,
        cmp: Comparison,
        rhs: LinearExpr,
    ) -> ConstraintId {
        let id = ConstraintId::from_raw(self.constraints.len() as u32);
        self.constraints.push(Constraint {
            name: name.into(),
            lhs,
            cmp,
            rhs,
        });
        id
    }

    /// Replaces the objective.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Returns the variable with the given ID.
    pub fn var(&self, id: VarId) -> &VarDef {
        &self.vars[id.index()]
    }

    /// Looks up a variable by name.
    pub fn find_var(&self, name: &str) -> Option<VarId> {
        self.var_by_name.get(name).copied()
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of binary variables.
    pub fn binary_count(&self) -> usize {
        self.vars
            .iter()
            .filter(|v| v.kind == VarKind::Binary)
            .count()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// `base#<n>` for the first `n >= id` not yet taken.
    fn unused_name(&self, base: &str, id: VarId) -> String {
        (id.as_raw()..)
            .map(|n| format!("{base}#{n}"))
            .find(|name| !self.var_by_name.contains_key(name))
            .unwrap_or_else(|| format!("{base}#{id}"))
    }

    /// Checks that every referenced variable exists and every domain is non-empty.
    ///
    /// Backends call this before translating the model.
    pub fn validate(&self) -> Result<(), MipError> {
        for var in &self.vars {
            let lower = var.lower.unwrap_or(f64::NEG_INFINITY);
            let upper = var.upper.unwrap_or(f64::INFINITY);
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(MipError::InvalidBounds {
                    name: var.name.clone(),
                    lower,
                    upper,
                });
            }
        }
        let count = self.vars.len();
        let check = |owner: &str, expr: &LinearExpr| {
            match expr.vars().find(|v| v.index() >= count) {
                Some(v) => Err(MipError::UnknownVariable {
                    constraint: owner.to_string(),
                    var: v.as_raw(),
                }),
                None => Ok(()),
            }
        };
        for c in &self.constraints {
            check(&c.name, &c.lhs)?;
            check(&c.name, &c.rhs)?;
        }
        check("objective", &self.objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_vars_and_lookup() {
        let mut m = MipModel::new();
        let x = m.add_continuous("x", Some(0.0), None);
        let b = m.add_binary("b");
        assert_eq!(m.var_count(), 2);
        assert_eq!(m.binary_count(), 1);
        assert_eq!(m.find_var("x"), Some(x));
        assert_eq!(m.var(b).kind, VarKind::Binary);
        assert_eq!(m.var(b).upper, Some(1.0));
    }

    #[test]
    fn expression_arithmetic() {
        let x = VarId::from_raw(0);
        let y = VarId::from_raw(1);
        let e = (LinearExpr::var(x) - LinearExpr::term(y, 2.0)) * 0.5 + 3.0;
        let value = e.eval_with(|v| if v == x { 4.0 } else { 1.0 });
        assert_eq!(value, 0.5 * 4.0 - 1.0 + 3.0);
    }

    #[test]
    fn constant_expression() {
        let e = LinearExpr::constant(5.0) - 2.0;
        assert!(e.is_constant());
        assert_eq!(e.eval_with(|_| 0.0), 3.0);
    }

    #[test]
    fn constraint_satisfaction() {
        let x = VarId::from_raw(0);
        let c = Constraint {
            name: "c".into(),
            lhs: LinearExpr::var(x),
            cmp: Comparison::Ge,
            rhs: LinearExpr::constant(2.0),
        };
        assert!(c.is_satisfied_with(|_| 2.0, 1e-9));
        assert!(!c.is_satisfied_with(|_| 1.0, 1e-9));
    }

    #[test]
    fn validate_rejects_unknown_variable() {
        let mut m = MipModel::new();
        m.add_constraint(
            "bad",
            LinearExpr::var(VarId::from_raw(3)),
            Comparison::Le,
            LinearExpr::zero(),
        );
        assert!(matches!(
            m.validate(),
            Err(MipError::UnknownVariable { var: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_domain() {
        let mut m = MipModel::new();
        m.add_continuous("x", Some(2.0), Some(1.0));
        assert!(matches!(m.validate(), Err(MipError::InvalidBounds { .. })));
    }

    #[test]
    fn serde_roundtrip_keeps_name_index() {
        let mut m = MipModel::new();
        let x = m.add_continuous("xloc_a", Some(0.0), Some(10.0));
        m.minimize(LinearExpr::var(x));
        let json = serde_json::to_string(&m).unwrap();
        let back: MipModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.find_var("xloc_a"), Some(x));
        assert_eq!(back.objective, m.objective);
    }

    #[test]
    fn colliding_names_get_distinct_variables() {
        let mut m = MipModel::new();
        // pairs (a_b, c) and (a, b_c) render the same distance name
        let first = m.add_continuous("xdist_a_b_c", Some(0.0), None);
        let second = m.add_continuous("xdist_a_b_c", Some(0.0), None);
        assert_ne!(first, second);
        assert_eq!(m.find_var("xdist_a_b_c"), Some(first));
        assert_eq!(m.var(second).name, "xdist_a_b_c#1");
        assert_eq!(m.find_var("xdist_a_b_c#1"), Some(second));
        assert_eq!(m.var_by_name.len(), 2);
    }
}
