//! A single message reported by the parser or template codegen.

use crate::category::Category;
use crate::severity::Severity;
use revue_source::Span;
use serde::{Deserialize, Serialize};

/// A message reported by a collaborator while compiling one component.
///
/// `span` points into the text the collaborator was given (the component
/// file for parser errors, the resolved template for codegen errors) and is
/// [`Span::DUMMY`] when the collaborator gave no location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The channel this diagnostic is logged on.
    pub category: Category,
    /// The message text as reported by the collaborator.
    pub message: String,
    /// Location of the problem, if known.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a diagnostic with no location.
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            span: Span::DUMMY,
        }
    }

    /// Creates a parser error.
    pub fn parser_error(message: impl Into<String>) -> Self {
        Self::new(Category::ParserError, message)
    }

    /// Creates a template codegen error.
    pub fn template_error(message: impl Into<String>) -> Self {
        Self::new(Category::TemplateError, message)
    }

    /// Creates a template codegen tip.
    pub fn template_tip(message: impl Into<String>) -> Self {
        Self::new(Category::TemplateTip, message)
    }

    /// Attaches a location to this diagnostic.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the severity implied by the category.
    pub fn severity(&self) -> Severity {
        self.category.severity()
    }
}
