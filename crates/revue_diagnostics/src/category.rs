//! Diagnostic categories, one per filterable log channel.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collaborator produced a diagnostic.
///
/// Each category is logged, silenced and filtered independently, and gets its
/// own header line per file.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// An error reported by the descriptor parser.
    ParserError,
    /// An error reported by template codegen.
    TemplateError,
    /// A tip reported by template codegen.
    TemplateTip,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 3] = [
        Category::ParserError,
        Category::TemplateError,
        Category::TemplateTip,
    ];

    /// Returns the severity records of this category are logged at.
    pub fn severity(self) -> Severity {
        match self {
            Category::ParserError | Category::TemplateError => Severity::Error,
            Category::TemplateTip => Severity::Warning,
        }
    }

    /// Returns the plural noun used in the category header line.
    pub fn heading(self) -> &'static str {
        match self {
            Category::ParserError => "parser errors",
            Category::TemplateError => "compiler errors",
            Category::TemplateTip => "compiler tips",
        }
    }

    /// Returns the tag prefixed to individual detail lines.
    pub fn tag(self) -> &'static str {
        match self {
            Category::ParserError => "parser error",
            Category::TemplateError => "compiler error",
            Category::TemplateTip => "compiler tip",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::ParserError => "parser_error",
            Category::TemplateError => "template_error",
            Category::TemplateTip => "template_tip",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        assert_eq!(Category::ParserError.severity(), Severity::Error);
        assert_eq!(Category::TemplateError.severity(), Severity::Error);
        assert_eq!(Category::TemplateTip.severity(), Severity::Warning);
    }

    #[test]
    fn headings() {
        assert_eq!(Category::ParserError.heading(), "parser errors");
        assert_eq!(Category::TemplateError.heading(), "compiler errors");
        assert_eq!(Category::TemplateTip.heading(), "compiler tips");
    }

    #[test]
    fn display_matches_serde_name() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
    }
}
