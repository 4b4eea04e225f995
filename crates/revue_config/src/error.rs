//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `revue.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// An exclude pattern is not a valid regular expression.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The regex compilation error.
        source: regex::Error,
    },

    /// A bridge command is present but has no program.
    #[error("empty command for '{0}'")]
    EmptyCommand(String),

    /// A value is outside the accepted set.
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// The configuration key or environment variable.
        key: String,
        /// The rejected value.
        value: String,
    },
}
