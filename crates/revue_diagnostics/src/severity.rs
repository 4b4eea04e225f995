//! How loudly a diagnostic record is logged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log level of a diagnostic record.
///
/// Template tips are warnings; parser and template errors are errors. The
/// compile still completes either way.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A hint from the template compiler.
    Warning,
    /// A parse or codegen problem that degrades the generated module.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
