//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while writing the cache.
///
/// Reads are fail-safe and never produce these: an unreadable entry is a
/// cache miss, and unreadable metadata resets the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while writing or clearing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The metadata document could not be serialized.
    #[error("failed to serialize cache metadata: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
