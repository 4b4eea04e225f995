//! The cache facade used by the compile hook.
//!
//! `Cache` ties the metadata document and the artifact store together:
//! freshness checks, lookups, stores, and wholesale invalidation.

use std::path::{Path, PathBuf};

use revue_common::stored_path;

use crate::artifact::ArtifactStore;
use crate::error::CacheError;
use crate::fingerprint::{FingerprintEntry, SfcMetadata};
use crate::metadata::CacheMetadata;

/// Freshness of one recorded component, as reported by [`Cache::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStatus {
    /// Component path as keyed in the metadata.
    pub key: String,
    /// Whether the cached module would be served.
    pub fresh: bool,
}

/// Persistent cache of compiled component modules.
///
/// The metadata document is loaded once, held in memory, and rewritten after
/// every store. All reads are fail-safe: a missing, unreadable or stale entry
/// is a cache miss.
pub struct Cache {
    /// Directory relative paths are resolved against.
    root: PathBuf,

    /// In-memory copy of `revue.json`.
    metadata: CacheMetadata,

    /// Compiled module storage.
    store: ArtifactStore,

    /// Compiler version the cache is valid for.
    compiler_version: String,
}

impl Cache {
    /// Loads the cache metadata, or starts from an empty document.
    ///
    /// Metadata written by another schema or compiler version, or that
    /// cannot be parsed, empties the cache directory; a fresh document with
    /// no entries is written in its place.
    pub fn initialize(
        root: &Path,
        cache_dir: &Path,
        compiler_version: &str,
    ) -> Result<Self, CacheError> {
        tracing::info!(cache_dir = %cache_dir.display(), "initializing permanent cache");
        let store = ArtifactStore::new(cache_dir);
        let metadata_exists = cache_dir.join(crate::metadata::METADATA_FILE).exists();

        let metadata = match CacheMetadata::load(cache_dir) {
            Some(m) if m.is_compatible(compiler_version) => m,
            Some(_) | None if metadata_exists => {
                tracing::info!("cache metadata is outdated, cleaning cache");
                store.clear()?;
                let fresh = CacheMetadata::new(compiler_version);
                fresh.save(cache_dir)?;
                fresh
            }
            _ => CacheMetadata::new(compiler_version),
        };

        Ok(Self {
            root: root.to_path_buf(),
            metadata,
            store,
            compiler_version: compiler_version.to_string(),
        })
    }

    /// Returns the metadata key of a component: its path with `/`
    /// separators, relative to the root when the component is inside it.
    pub fn key_for(&self, file_path: &Path) -> String {
        stored_path(&self.root, file_path)
    }

    /// Returns `true` if `file_path` has an entry whose fingerprint still
    /// matches the disk.
    ///
    /// The external block paths recorded in the stored entry are the ones
    /// re-examined; a recorded file that no longer exists recomputes to
    /// `null` and so mismatches.
    pub fn has_cached_file(&self, file_path: &Path) -> bool {
        let Some(stored) = self.metadata.entries.get(&self.key_for(file_path)) else {
            return false;
        };
        let sources = stored.sources(&self.root, file_path);
        FingerprintEntry::compute(&self.root, &sources) == *stored
    }

    /// Returns the cached module for `file_path` if it is still fresh.
    pub fn get_cached(&self, file_path: &Path) -> Option<String> {
        if !self.has_cached_file(file_path) {
            tracing::info!(file = %file_path.display(), "cached compiled file not found");
            return None;
        }
        let key = self.key_for(file_path);
        let content = self.store.read(&key);
        if content.is_some() {
            tracing::info!(
                file = %file_path.display(),
                cached = %self.store.artifact_path(&key).display(),
                "cached compiled file found"
            );
        }
        content
    }

    /// Stores a compiled module and records its fingerprint.
    ///
    /// Writes the module text first, then updates the in-memory metadata
    /// and persists it.
    pub fn set_cached(&mut self, meta: &SfcMetadata, content: &str) -> Result<(), CacheError> {
        let key = self.key_for(&meta.file_path);
        let path = self.store.write(&key, content)?;
        tracing::info!(file = %meta.file_path.display(), cached = %path.display(), "wrote compiled file to cache");

        let entry = FingerprintEntry::compute(&self.root, meta);
        self.metadata.entries.insert(key, entry);
        self.metadata.save(self.store.cache_dir())
    }

    /// Empties the cache directory and forgets every entry.
    ///
    /// Returns the number of top-level entries removed from disk.
    pub fn clean(&mut self) -> Result<usize, CacheError> {
        let removed = self.store.clear()?;
        self.metadata = CacheMetadata::new(&self.compiler_version);
        Ok(removed)
    }

    /// Reports the freshness of every recorded component.
    pub fn status(&self) -> Vec<EntryStatus> {
        self.metadata
            .entries
            .keys()
            .map(|key| EntryStatus {
                key: key.clone(),
                fresh: self.has_cached_file(&self.root.join(key)),
            })
            .collect()
    }

    /// Returns the in-memory metadata document.
    pub fn metadata(&self) -> &CacheMetadata {
        &self.metadata
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.store.cache_dir()
    }
}
