//! Accumulator for the diagnostics of one compile stage.

use crate::diagnostic::Diagnostic;
use std::sync::{Mutex, MutexGuard};

/// Collects diagnostics while a component is compiled.
///
/// Collaborator output is pushed through a shared reference; the
/// orchestrator drains the sink after each stage and hands the batch to
/// [`report_diagnostics`](crate::report_diagnostics).
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        self.lock().push(diag);
    }

    /// Emits every diagnostic from an iterator.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        self.lock().extend(diags);
    }

    /// Takes all accumulated diagnostics in emission order, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
