//! Compilation of single-file components into loadable modules.
//!
//! The [`Orchestrator`] drives one compile: it asks the [`SfcCompiler`]
//! collaborator for a descriptor, resolves the script and template blocks,
//! optionally runs a [`Transpiler`], stitches the source maps together and
//! normalizes the result into the configured module format. The
//! [`CompileHook`] wraps it with the persistent cache and the re-entrancy
//! guard a module loader needs.

#![warn(missing_docs)]

pub mod bridge;
pub mod collaborator;
pub mod descriptor;
pub mod error;
pub mod hook;
pub mod normalize;
pub mod orchestrator;
pub mod resolver;
pub mod variant;

pub use bridge::{BridgeError, ProcessBridge};
pub use collaborator::{
    CompilerMessage, ParseOutput, SfcCompiler, TemplateOutput, TemplateRequest, TranspileOutput,
    TranspileRequest, Transpiler,
};
pub use descriptor::{Block, BlockKind, Descriptor, ScriptBlock};
pub use error::CompileError;
pub use hook::CompileHook;
pub use orchestrator::{CompileOptions, CompileOutput, Orchestrator};
pub use resolver::{resolve_block, ResolvedBlock};
pub use variant::CompilerVariant;
