//! Diagnostic codes and helpers for recoverable floorplanning findings.
//!
//! Warning codes `W101`--`W104` cover constraint records the engine can still
//! act on. `S201` reports the solve outcome.

use agplan_diagnostics::{Category, Diagnostic, DiagnosticCode, RecordRef};

/// A corner record without its partner corner.
pub const W101: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

/// A Resource record replacing a synthesized count.
pub const W102: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);

/// A record introducing a partition the resource report does not know.
pub const W103: DiagnosticCode = DiagnosticCode::new(Category::Warning, 103);

/// A Location record superseded by a pair of corners.
pub const W104: DiagnosticCode = DiagnosticCode::new(Category::Warning, 104);

/// Solve summary.
pub const S201: DiagnosticCode = DiagnosticCode::new(Category::Solver, 201);

/// Creates a warning for a lone corner.
pub fn warn_lone_corner(name: &str, record: RecordRef, missing: &str) -> Diagnostic {
    Diagnostic::warning(W101, format!("`{name}` has a corner but no {missing} corner"))
        .with_partition(name)
        .with_record(record)
        .with_note("the corner is kept but does not pin the region")
}

/// Creates a warning for a Resource record that replaces a count.
pub fn warn_resource_override(name: &str, record: RecordRef, old: f64, new: f64) -> Diagnostic {
    Diagnostic::warning(
        W102,
        format!("resource count of `{name}` overridden from {old} to {new}"),
    )
    .with_partition(name)
    .with_record(record)
}

/// Creates a warning for a partition introduced by a non-sizing record.
pub fn warn_unreported_partition(name: &str, record: RecordRef) -> Diagnostic {
    Diagnostic::warning(
        W103,
        format!("`{name}` does not appear in the resource report"),
    )
    .with_partition(name)
    .with_record(record)
    .with_note("it needs a Size or Resource record to be placed")
}

/// Creates a warning for a Location record overridden by corners.
pub fn warn_location_superseded(name: &str, record: RecordRef) -> Diagnostic {
    Diagnostic::warning(
        W104,
        format!("location of `{name}` replaced by the center of its corners"),
    )
    .with_partition(name)
    .with_record(record)
}

/// Creates the solve summary note.
pub fn note_solved(status: &str, partitions: usize, vars: usize, constraints: usize) -> Diagnostic {
    Diagnostic::note(
        S201,
        format!(
            "placed {partitions} partitions ({status}, {vars} variables, {constraints} constraints)"
        ),
    )
}
