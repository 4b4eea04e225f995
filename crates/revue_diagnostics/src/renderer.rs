//! Rendering of diagnostic groups into log lines.

use crate::category::Category;
use crate::diagnostic::Diagnostic;
use revue_source::SourceDb;
use std::path::Path;

/// The lines produced for one (file, category) group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedGroup {
    /// The category header naming the file.
    pub header: String,
    /// One entry per detail record.
    pub details: Vec<String>,
}

/// Formats a group of same-category diagnostics for one file.
pub trait DiagnosticRenderer {
    /// Renders `diags`, all of `category`, reported for `file`.
    ///
    /// Returns `None` when there is nothing to render.
    fn render(
        &self,
        file: &Path,
        category: Category,
        diags: &[&Diagnostic],
        source_db: &SourceDb,
    ) -> Option<RenderedGroup>;
}

/// Renders diagnostics as plain log lines tagged with a product prefix.
///
/// Produces, for a template with an unmatched closing tag:
/// ```text
/// [revue] compiler errors in file: src/App.vue
/// [revue: compiler errors]
///
///   Invalid end tag.
///
///   1  |  <template>
///   2  |    <div></span>
///      |         ^^^^^^^
/// ```
/// Parser errors and tips get one detail line each; template errors are
/// joined into a single detail block with code frames.
pub struct LineRenderer {
    prefix: String,
}

impl LineRenderer {
    /// Creates a renderer whose lines are tagged with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn header(&self, file: &Path, category: Category) -> String {
        format!(
            "[{}] {} in file: {}",
            self.prefix,
            category.heading(),
            file.display()
        )
    }

    fn template_error_block(&self, diags: &[&Diagnostic], source_db: &SourceDb) -> String {
        let entries: Vec<String> = diags
            .iter()
            .map(|diag| match source_db.code_frame(diag.span) {
                Some(frame) => format!("  {}\n\n{}", diag.message, pad(&frame)),
                None => format!("  {}", diag.message),
            })
            .collect();
        format!(
            "[{}: {}]\n\n{}\n",
            self.prefix,
            Category::TemplateError.heading(),
            entries.join("\n\n")
        )
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new("revue")
    }
}

impl DiagnosticRenderer for LineRenderer {
    fn render(
        &self,
        file: &Path,
        category: Category,
        diags: &[&Diagnostic],
        source_db: &SourceDb,
    ) -> Option<RenderedGroup> {
        if diags.is_empty() {
            return None;
        }
        let details = match category {
            Category::TemplateError => vec![self.template_error_block(diags, source_db)],
            Category::ParserError | Category::TemplateTip => diags
                .iter()
                .map(|diag| format!("[{}: {}] {}", self.prefix, category.tag(), diag.message))
                .collect(),
        };
        Some(RenderedGroup {
            header: self.header(file, category),
            details,
        })
    }
}

/// Indents every line of a code frame by two spaces.
fn pad(frame: &str) -> String {
    frame
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
