//! The boundary to the external component compiler and script transpiler.
//!
//! Both collaborators are traits so the orchestrator can be driven by the
//! process bridge in production and by in-process fakes in tests.

use serde::{Deserialize, Serialize};

use crate::bridge::BridgeError;
use crate::descriptor::{Descriptor, ScriptBlock};

/// A diagnostic message as reported by a collaborator.
///
/// `range` is a byte range into the text the collaborator was given.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "WireMessage")]
pub struct CompilerMessage {
    /// Message text.
    pub message: String,
    /// Byte range of the problem, when reported.
    pub range: Option<(usize, usize)>,
}

impl CompilerMessage {
    /// A message with no location.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            range: None,
        }
    }

    /// A message located at `start..end`.
    pub fn at(message: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            message: message.into(),
            range: Some((start, end)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireMessage {
    Text(String),
    Legacy {
        msg: String,
        start: Option<usize>,
        end: Option<usize>,
    },
    Modern {
        message: String,
        loc: Option<WireLoc>,
    },
}

#[derive(Deserialize)]
struct WireLoc {
    start: WireOffset,
    end: WireOffset,
}

#[derive(Deserialize)]
struct WireOffset {
    offset: usize,
}

impl From<WireMessage> for CompilerMessage {
    fn from(wire: WireMessage) -> Self {
        match wire {
            WireMessage::Text(message) => CompilerMessage::text(message),
            WireMessage::Legacy { msg, start, end } => CompilerMessage {
                message: msg,
                range: start.map(|s| (s, end.unwrap_or(s))),
            },
            WireMessage::Modern { message, loc } => CompilerMessage {
                message,
                range: loc.map(|l| (l.start.offset, l.end.offset)),
            },
        }
    }
}

/// Result of parsing a component file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ParseOutput {
    /// The parsed blocks.
    pub descriptor: Descriptor,
    /// Parser diagnostics; ranges point into the component file.
    #[serde(default)]
    pub errors: Vec<CompilerMessage>,
}

/// A template codegen request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    /// Template text.
    pub source: String,
    /// File the template came from (the external file when there is one).
    pub filename: String,
    /// Whether the component is functional.
    pub is_functional: bool,
    /// Whether the script is TypeScript.
    pub is_ts: bool,
    /// Binding metadata of the compiled script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<serde_json::Value>,
}

/// Result of template codegen.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TemplateOutput {
    /// Generated render function module text.
    pub code: String,
    /// Map from `code` back to the template's file.
    #[serde(default)]
    pub map: Option<serde_json::Value>,
    /// Codegen errors; ranges point into the template text.
    #[serde(default)]
    pub errors: Vec<CompilerMessage>,
    /// Codegen tips.
    #[serde(default)]
    pub tips: Vec<CompilerMessage>,
}

/// A transpilation request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranspileRequest {
    /// File the code came from.
    pub filename: String,
    /// Script text.
    pub code: String,
    /// Transpiler options as configured.
    pub options: serde_json::Value,
}

/// Result of transpilation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TranspileOutput {
    /// Transpiled text.
    pub code: String,
    /// Map from `code` back to the request's code.
    #[serde(default)]
    pub map: Option<serde_json::Value>,
}

/// The component compiler collaborator.
pub trait SfcCompiler {
    /// The compiler's version string.
    fn version(&self) -> &str;

    /// Parses a component file into blocks.
    fn parse(&self, source: &str, filename: &str) -> Result<ParseOutput, BridgeError>;

    /// Prepares the script of a descriptor, merging `<script setup>` when
    /// present. Returns `None` when the component has no script.
    fn compile_script(
        &self,
        descriptor: &Descriptor,
        filename: &str,
    ) -> Result<Option<ScriptBlock>, BridgeError>;

    /// Generates the render function for a template.
    fn compile_template(&self, request: &TemplateRequest) -> Result<TemplateOutput, BridgeError>;
}

/// The optional script transpiler collaborator.
pub trait Transpiler {
    /// Rewrites a script, returning the new text and its map.
    fn transpile(&self, request: &TranspileRequest) -> Result<TranspileOutput, BridgeError>;
}
