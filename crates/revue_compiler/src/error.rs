//! Fatal compile errors.

use std::path::PathBuf;

use revue_cache::CacheError;
use revue_config::ConfigError;
use revue_sourcemap::SourceMapError;

use crate::bridge::BridgeError;

/// A failure that aborts the compilation of one component.
///
/// Diagnostics reported by the collaborators never produce one of these;
/// they are logged and compilation continues.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// An external block file could not be read.
    #[error("failed to read {kind} block of {path}: {source}")]
    ReadBlock {
        /// Block kind (`script` or `template`).
        kind: &'static str,
        /// The external file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The collaborator failed while handling a request for a component.
    #[error("compiler error: failed to {action} {path}: {source}")]
    Collaborator {
        /// What was being attempted, e.g. `compile script of`.
        action: &'static str,
        /// The component being compiled.
        path: PathBuf,
        /// Underlying bridge error.
        source: BridgeError,
    },

    /// The transpiler failed on a script.
    #[error("failed to transpile {path}: {source}")]
    Transpile {
        /// The script being transpiled.
        path: PathBuf,
        /// Underlying bridge error.
        source: BridgeError,
    },

    /// A source map produced by a collaborator could not be decoded.
    #[error("invalid source map for {path}: {source}")]
    SourceMap {
        /// The component being compiled.
        path: PathBuf,
        /// Underlying decoding error.
        source: SourceMapError,
    },

    /// The component uses `<script setup>` with a compiler too old for it.
    #[error("<script setup> in {path} requires compiler 2.7 or newer (found {version})")]
    UnsupportedSetup {
        /// The component being compiled.
        path: PathBuf,
        /// The collaborator's reported version.
        version: String,
    },

    /// The collaborator reported a version this crate cannot drive.
    #[error("unsupported compiler version '{0}'")]
    UnsupportedCompiler(String),

    /// The compiler bridge could not be started.
    #[error("failed to start compiler: {0}")]
    Bridge(#[source] BridgeError),

    /// Transpilation is enabled but its command could not be started.
    #[error("transpilation is enabled but '{command}' could not be started: {source}")]
    MissingTranspiler {
        /// The configured transpiler command line.
        command: String,
        /// Underlying bridge error.
        source: BridgeError,
    },

    /// The configuration could not be turned into compile options.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The persistent cache failed to persist a result.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
