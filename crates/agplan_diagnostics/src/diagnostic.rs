//! Structured diagnostic messages with severity, codes, and record references.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the constraint record a diagnostic is about.
///
/// Constraint records arrive pre-parsed as an ordered list, so the position in
/// that list plus the record kind is the closest thing to a source location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// Zero-based position in the ordered record list.
    pub index: usize,
    /// Short name of the record kind (e.g. `"Location"`).
    pub kind: String,
}

impl RecordRef {
    /// Creates a new record reference.
    pub fn new(index: usize, kind: impl Into<String>) -> Self {
        Self {
            index,
            kind: kind.into(),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{} ({})", self.index, self.kind)
    }
}

/// A structured diagnostic message.
///
/// Each diagnostic includes a severity level and code, a primary message,
/// the partition it concerns, the record that triggered it, and optional notes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The partition this diagnostic concerns, if any.
    pub partition: Option<String>,
    /// The constraint record that triggered it, if any.
    pub record: Option<RecordRef>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message)
    }

    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            partition: None,
            record: None,
            notes: Vec::new(),
        }
    }

    /// Attaches the partition name.
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }

    /// Attaches the triggering record.
    pub fn with_record(mut self, record: RecordRef) -> Self {
        self.record = Some(record);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Warning, 101);
        let diag = Diagnostic::warning(code, "lone corner");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "lone corner");
        assert!(diag.record.is_none());
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Warning, 102);
        let diag = Diagnostic::warning(code, "resource override")
            .with_partition("dram_ctrl")
            .with_record(RecordRef::new(3, "Resource"))
            .with_note("synthesized usage was 1200");
        assert_eq!(diag.partition.as_deref(), Some("dram_ctrl"));
        assert_eq!(diag.record, Some(RecordRef::new(3, "Resource")));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn record_ref_display() {
        assert_eq!(
            RecordRef::new(4, "Relationship").to_string(),
            "record #4 (Relationship)"
        );
    }
}
