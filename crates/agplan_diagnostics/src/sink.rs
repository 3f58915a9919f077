//! Thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Collects the findings of one floorplanning batch.
///
/// Fatal problems are `Err` values of the engine, so a sink only ever holds
/// warnings and notes. The warning count is kept outside the lock.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    warnings: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking emitter cannot leave the vector half-pushed.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Warning {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Returns a copy of every diagnostic, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }
}
