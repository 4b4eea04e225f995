//! Storage of compiled module text.
//!
//! Each compiled module is stored as plain text at `<cache_dir>/<key>`,
//! where the key is the component's metadata key with any root, drive or
//! parent segments removed. The source map is embedded in the text, so
//! there is nothing else to store.

use std::path::{Path, PathBuf};

use crate::error::CacheError;

/// Reads and writes compiled modules under a cache directory.
pub struct ArtifactStore {
    /// Root cache directory.
    cache_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a new artifact store rooted at the given cache directory.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Returns the root cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the file path for the module cached under `key`.
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        key.split('/')
            .filter(|part| !part.is_empty() && *part != ".." && !part.ends_with(':'))
            .fold(self.cache_dir.clone(), |path, part| path.join(part))
    }

    /// Writes a compiled module, creating parent directories as needed.
    pub fn write(&self, key: &str, content: &str) -> Result<PathBuf, CacheError> {
        let path = self.artifact_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&path, content).map_err(|e| CacheError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Reads a compiled module, returning `None` if it is missing or unreadable.
    pub fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.artifact_path(key)).ok()
    }

    /// Removes everything inside the cache directory, keeping the directory.
    ///
    /// Returns the number of top-level entries removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(CacheError::Io {
                    path: self.cache_dir.clone(),
                    source: e,
                })
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let result = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            result.map_err(|e| CacheError::Io { path, source: e })?;
            removed += 1;
        }
        Ok(removed)
    }
}
