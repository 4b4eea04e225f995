//! Delivery of rendered diagnostics to the log.

use crate::category::Category;
use crate::diagnostic::Diagnostic;
use crate::filter::DiagnosticPolicy;
use crate::renderer::DiagnosticRenderer;
use crate::severity::Severity;
use revue_source::SourceDb;
use std::path::Path;
use std::sync::Mutex;

/// Whether a record is a category header or a detail line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordKind {
    /// The `<category> in file: <path>` line opening a group.
    Header,
    /// A message following a header.
    Detail,
}

/// One structured log record produced from diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Header or detail.
    pub kind: RecordKind,
    /// Level the record is logged at.
    pub severity: Severity,
    /// Category of the diagnostics in the group.
    pub category: Category,
    /// The file the diagnostics belong to.
    pub file: String,
    /// Rendered text.
    pub text: String,
}

/// Receives rendered diagnostic records.
pub trait DiagnosticReporter: Send + Sync {
    /// Delivers one record.
    fn report(&self, record: &Record);
}

/// Logs records through `tracing`, tagged with `file` and `category` fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, record: &Record) {
        match record.severity {
            Severity::Error => tracing::error!(
                file = %record.file,
                category = %record.category,
                "{}",
                record.text
            ),
            Severity::Warning => tracing::warn!(
                file = %record.file,
                category = %record.category,
                "{}",
                record.text
            ),
        }
    }
}

/// Keeps records in memory, for callers that inspect what was reported.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    records: Mutex<Vec<Record>>,
}

impl CollectingReporter {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the collected records.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, record: &Record) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}

/// Filters, renders and reports the diagnostics of one compiled file.
///
/// Categories are reported in [`Category::ALL`] order. A category produces
/// no records at all when it is disabled or every message is excluded.
/// Returns the number of records reported.
pub fn report_diagnostics(
    file: &Path,
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    policy: &DiagnosticPolicy,
    renderer: &dyn DiagnosticRenderer,
    reporter: &dyn DiagnosticReporter,
) -> usize {
    let mut reported = 0;
    for category in Category::ALL {
        let in_category: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.category == category)
            .collect();
        if in_category.is_empty() {
            continue;
        }
        if !policy.for_category(category).enabled {
            tracing::debug!(file = %file.display(), %category, "diagnostics output is disabled");
            continue;
        }
        let allowed: Vec<&Diagnostic> = in_category
            .into_iter()
            .filter(|d| policy.allows(d))
            .collect();
        let Some(group) = renderer.render(file, category, &allowed, source_db) else {
            continue;
        };

        let file_name = file.display().to_string();
        let make = |kind, text: String| Record {
            kind,
            severity: category.severity(),
            category,
            file: file_name.clone(),
            text,
        };
        reporter.report(&make(RecordKind::Header, group.header));
        reported += 1;
        for detail in group.details {
            reporter.report(&make(RecordKind::Detail, detail));
            reported += 1;
        }
    }
    reported
}
