//! Diagnostic rendering for human-readable output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W101]: lower-left corner without upper-right corner is ignored
///   --> partition `dram_ctrl`, record #7 (LowerLeft)
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in the header line.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        if self.color {
            let color = diag.severity.ansi_color();
            out.push_str(&format!("\x1b[1;{color}m{header}\x1b[0m: {}\n", diag.message));
        } else {
            out.push_str(&format!("{header}: {}\n", diag.message));
        }

        let location = match (&diag.partition, &diag.record) {
            (Some(p), Some(r)) => Some(format!("partition `{p}`, {r}")),
            (Some(p), None) => Some(format!("partition `{p}`")),
            (None, Some(r)) => Some(r.to_string()),
            (None, None) => None,
        };
        if let Some(location) = location {
            out.push_str(&format!("  --> {location}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        out
    }
}
