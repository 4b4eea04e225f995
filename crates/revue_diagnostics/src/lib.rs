//! Diagnostics emitted while compiling components.
//!
//! The descriptor parser and the template codegen engine report problems as
//! [`Diagnostic`] records tagged with a [`Category`]. They accumulate in a
//! [`DiagnosticSink`] during one compile, are filtered by a
//! [`DiagnosticPolicy`], rendered into a category header plus detail lines by
//! a [`DiagnosticRenderer`], and finally handed to a [`DiagnosticReporter`]
//! (normally [`TracingReporter`]). None of this ever aborts a compile.

#![warn(missing_docs)]

pub mod category;
pub mod diagnostic;
pub mod filter;
pub mod renderer;
pub mod reporter;
pub mod severity;
pub mod sink;

pub use category::Category;
pub use diagnostic::Diagnostic;
pub use filter::{CategoryPolicy, DiagnosticPolicy, ExcludeRule, MessageFilter};
pub use renderer::{DiagnosticRenderer, LineRenderer, RenderedGroup};
pub use reporter::{
    report_diagnostics, CollectingReporter, DiagnosticReporter, Record, RecordKind,
    TracingReporter,
};
pub use severity::Severity;
pub use sink::DiagnosticSink;
