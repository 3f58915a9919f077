//! How seriously a finding affects the floorplan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic, least severe first.
///
/// Warnings mark constraint records that were ignored or overridden; the
/// batch still produces a floorplan. Notes report solve statistics. Fatal
/// problems are not diagnostics but `Err` values.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Informational.
    Note,
    /// A record was ignored, overridden, or implied a partition nobody reported.
    Warning,
}

impl Severity {
    /// SGR color used for the rendered header.
    pub(crate) fn ansi_color(self) -> &'static str {
        match self {
            Severity::Note => "36",
            Severity::Warning => "33",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_sort_below_warnings() {
        let mut levels = vec![Severity::Warning, Severity::Note];
        levels.sort();
        assert_eq!(levels, [Severity::Note, Severity::Warning]);
    }

    #[test]
    fn labels_match_rendered_headers() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.to_string(), "note");
        assert_ne!(Severity::Note.ansi_color(), Severity::Warning.ansi_color());
    }
}
