//! The versioned cache metadata document.
//!
//! Stored as `revue.json` in the cache directory:
//!
//! ```json
//! {
//!   "version": 2,
//!   "compilerVersion": "3.4.21",
//!   "entries": {
//!     "src/App.vue": { "mtimeMs": 1700000000000.5, "externalScript": null, "externalTemplate": null }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::fingerprint::FingerprintEntry;

/// Name of the metadata file within the cache directory.
pub const METADATA_FILE: &str = "revue.json";

/// Schema version of the metadata document.
pub const CURRENT_VERSION: u32 = 2;

/// Fingerprints of every cached component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    /// Schema version; documents of another version are discarded.
    pub version: u32,
    /// Version of the component compiler that produced the cached modules.
    pub compiler_version: String,
    /// Fingerprints keyed by component path (see [`Cache::key_for`](crate::Cache::key_for)).
    pub entries: BTreeMap<String, FingerprintEntry>,
}

impl CacheMetadata {
    /// Creates an empty document for the given compiler version.
    pub fn new(compiler_version: &str) -> Self {
        Self {
            version: CURRENT_VERSION,
            compiler_version: compiler_version.to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Loads the document from the cache directory, returning `None` if it
    /// doesn't exist or can't be parsed.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let path = cache_dir.join(METADATA_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to read cache metadata: {e}");
                None
            }
        }
    }

    /// Returns `true` if the document was written by this schema version and
    /// the given compiler version.
    pub fn is_compatible(&self, compiler_version: &str) -> bool {
        self.version == CURRENT_VERSION && self.compiler_version == compiler_version
    }

    /// Writes the document, pretty-printed, to the cache directory.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save(&self, cache_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(cache_dir).map_err(|e| CacheError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = cache_dir.join(METADATA_FILE);
        std::fs::write(&path, json).map_err(|e| CacheError::Io { path, source: e })
    }
}
