//! Per-category enable switches and exclude lists.

use crate::category::Category;
use crate::diagnostic::Diagnostic;
use regex::Regex;

/// One entry of an exclude list.
#[derive(Clone, Debug)]
pub enum ExcludeRule {
    /// Drops messages equal to this string.
    Exact(String),
    /// Drops messages this regex matches anywhere.
    Pattern(Regex),
}

impl ExcludeRule {
    /// Returns `true` if `message` is excluded by this rule.
    pub fn matches(&self, message: &str) -> bool {
        match self {
            ExcludeRule::Exact(text) => text == message,
            ExcludeRule::Pattern(re) => re.is_match(message),
        }
    }
}

impl PartialEq for ExcludeRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExcludeRule::Exact(a), ExcludeRule::Exact(b)) => a == b,
            (ExcludeRule::Pattern(a), ExcludeRule::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// An exclude list applied to the raw message text of diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageFilter {
    rules: Vec<ExcludeRule>,
}

impl MessageFilter {
    /// Creates a filter from a list of exclude rules.
    pub fn new(rules: Vec<ExcludeRule>) -> Self {
        Self { rules }
    }

    /// Returns `true` if no rule excludes `message`.
    pub fn allows(&self, message: &str) -> bool {
        !self.rules.iter().any(|rule| rule.matches(message))
    }

    /// Returns the number of rules in this filter.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the filter has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Logging policy for one [`Category`].
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPolicy {
    /// Whether diagnostics of this category are logged at all.
    pub enabled: bool,
    /// Messages dropped even when the category is enabled.
    pub filter: MessageFilter,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: MessageFilter::default(),
        }
    }
}

/// Logging policy for all diagnostic categories.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagnosticPolicy {
    /// Policy for descriptor parser errors.
    pub parser_errors: CategoryPolicy,
    /// Policy for template codegen errors.
    pub template_errors: CategoryPolicy,
    /// Policy for template codegen tips.
    pub template_tips: CategoryPolicy,
}

impl DiagnosticPolicy {
    /// Returns the policy for a category.
    pub fn for_category(&self, category: Category) -> &CategoryPolicy {
        match category {
            Category::ParserError => &self.parser_errors,
            Category::TemplateError => &self.template_errors,
            Category::TemplateTip => &self.template_tips,
        }
    }

    /// Returns `true` if the diagnostic should be logged.
    pub fn allows(&self, diag: &Diagnostic) -> bool {
        let policy = self.for_category(diag.category);
        policy.enabled && policy.filter.allows(&diag.message)
    }
}
