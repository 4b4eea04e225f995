//! Persistent cache of compiled component modules.
//!
//! Compiled modules are written under a cache directory mirroring each
//! component's path, and a versioned metadata document
//! (`revue.json`) records a modification-time fingerprint per component. A
//! cached module is served only while recomputing its fingerprint from disk
//! reproduces the stored one exactly. Metadata written by another schema or
//! compiler version discards the whole cache.

#![warn(missing_docs)]

pub mod artifact;
pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod metadata;

pub use artifact::ArtifactStore;
pub use cache::{Cache, EntryStatus};
pub use error::CacheError;
pub use fingerprint::{mtime_ms, ExternalFile, FingerprintEntry, SfcMetadata};
pub use metadata::{CacheMetadata, CURRENT_VERSION, METADATA_FILE};
