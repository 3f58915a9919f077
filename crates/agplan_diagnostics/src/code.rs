//! Stable identifiers such as `W101` for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stage a code belongs to; decides its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Constraint-record findings, `W`.
    Warning,
    /// Solve reports, `S`.
    Solver,
}

impl Category {
    /// Prefix letter used when the code is displayed.
    pub fn prefix(self) -> char {
        match self {
            Category::Warning => 'W',
            Category::Solver => 'S',
        }
    }
}

/// A category plus a number, shown as the prefix and three digits (`S201`).
///
/// Codes are stable across releases so that build logs can be grepped for them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Stage the code belongs to.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
