//! Modification-time fingerprints of a component and its external blocks.

use revue_common::stored_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// The files a compiled module was built from.
///
/// Produced by the compiler for every compile; it is all the cache needs to
/// fingerprint the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SfcMetadata {
    /// The component file.
    pub file_path: PathBuf,
    /// The external script file, when the script block has a `src`.
    pub external_script_path: Option<PathBuf>,
    /// The external template file, when the template block has a `src`.
    pub external_template_path: Option<PathBuf>,
}

impl SfcMetadata {
    /// Metadata for a component without external blocks.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            external_script_path: None,
            external_template_path: None,
        }
    }
}

/// An external block file recorded in a fingerprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFile {
    /// Path with `/` separators, relative to the project root when the file
    /// is inside it and absolute otherwise.
    pub path: String,
    /// Modification time in milliseconds since the Unix epoch.
    pub mtime_ms: f64,
}

/// The stored freshness record of one component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintEntry {
    /// Modification time of the component file, `null` when it is missing.
    pub mtime_ms: Option<f64>,
    /// The external script, `null` when absent or missing.
    pub external_script: Option<ExternalFile>,
    /// The external template, `null` when absent or missing.
    pub external_template: Option<ExternalFile>,
}

impl FingerprintEntry {
    /// Computes the fingerprint of `meta` from the current disk state.
    ///
    /// Relative paths are resolved against `root`.
    pub fn compute(root: &Path, meta: &SfcMetadata) -> Self {
        let external = |path: &Option<PathBuf>| {
            let path = root.join(path.as_deref()?);
            Some(ExternalFile {
                path: stored_path(root, &path),
                mtime_ms: mtime_ms(&path)?,
            })
        };
        Self {
            mtime_ms: mtime_ms(&root.join(&meta.file_path)),
            external_script: external(&meta.external_script_path),
            external_template: external(&meta.external_template_path),
        }
    }

    /// Returns the metadata this entry was computed from, with the stored
    /// external paths resolved against `root`.
    pub fn sources(&self, root: &Path, file_path: &Path) -> SfcMetadata {
        SfcMetadata {
            file_path: file_path.to_path_buf(),
            external_script_path: self.external_script.as_ref().map(|e| root.join(&e.path)),
            external_template_path: self.external_template.as_ref().map(|e| root.join(&e.path)),
        }
    }
}

/// Returns the modification time of `path` in fractional milliseconds since
/// the Unix epoch, or `None` when the file does not exist.
pub fn mtime_ms(path: &Path) -> Option<f64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
    Some(since_epoch.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn touch(path: &Path, secs: u64) {
        touch_at(path, Duration::from_secs(secs));
    }

    fn touch_at(path: &Path, since_epoch: Duration) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + since_epoch).unwrap();
    }

    #[test]
    fn mtime_of_missing_file_is_none() {
        assert!(mtime_ms(Path::new("/nonexistent/App.vue")).is_none());
    }

    #[test]
    fn mtime_is_milliseconds() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("App.vue");
        std::fs::write(&file, "<template/>").unwrap();
        touch(&file, 1_700_000_000);
        assert_eq!(mtime_ms(&file), Some(1_700_000_000_000.0));
    }

    #[test]
    fn compute_records_relative_external_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/App.vue"), "").unwrap();
        std::fs::write(root.join("src/App.js"), "").unwrap();
        touch(&root.join("src/App.vue"), 10);
        touch(&root.join("src/App.js"), 20);

        let meta = SfcMetadata {
            file_path: root.join("src/App.vue"),
            external_script_path: Some(root.join("src/App.js")),
            external_template_path: None,
        };
        let entry = FingerprintEntry::compute(root, &meta);
        assert_eq!(entry.mtime_ms, Some(10_000.0));
        assert_eq!(
            entry.external_script,
            Some(ExternalFile {
                path: "src/App.js".to_string(),
                mtime_ms: 20_000.0
            })
        );
        assert!(entry.external_template.is_none());

        let sources = entry.sources(root, &meta.file_path);
        assert_eq!(sources, meta);
    }

    #[test]
    fn sub_millisecond_mtimes_survive_json() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let mut stored = Vec::new();
        for i in 0..64u64 {
            let file = root.join(format!("C{i}.vue"));
            std::fs::write(&file, "").unwrap();
            touch_at(&file, Duration::from_nanos(1_760_600_002_015_838_123 + i * 7_919_113));
            let meta = SfcMetadata::new(file);
            let json = serde_json::to_string(&FingerprintEntry::compute(root, &meta)).unwrap();
            stored.push((meta, json));
        }
        for (meta, json) in stored {
            let reloaded: FingerprintEntry = serde_json::from_str(&json).unwrap();
            assert_eq!(FingerprintEntry::compute(root, &meta), reloaded, "{json}");
        }
    }

    #[test]
    fn external_file_outside_root_resolves_back() {
        let project = tempfile::tempdir().unwrap();
        let shared = tempfile::tempdir().unwrap();
        let file = project.path().join("App.vue");
        let script = shared.path().join("app.js");
        std::fs::write(&file, "").unwrap();
        std::fs::write(&script, "").unwrap();

        let meta = SfcMetadata {
            file_path: file.clone(),
            external_script_path: Some(script.clone()),
            external_template_path: None,
        };
        let entry = FingerprintEntry::compute(project.path(), &meta);
        let stored = &entry.external_script.as_ref().unwrap().path;
        assert!(Path::new(stored).is_absolute(), "{stored}");

        let sources = entry.sources(project.path(), &file);
        assert_eq!(sources.external_script_path, Some(script));
        assert_eq!(FingerprintEntry::compute(project.path(), &sources), entry);
    }

    #[test]
    fn missing_external_file_is_null() {
        let dir = tempfile::tempdir().unwrap();
        let meta = SfcMetadata {
            file_path: dir.path().join("App.vue"),
            external_script_path: None,
            external_template_path: Some(dir.path().join("gone.html")),
        };
        let entry = FingerprintEntry::compute(dir.path(), &meta);
        assert!(entry.mtime_ms.is_none());
        assert!(entry.external_template.is_none());
    }

    #[test]
    fn json_shape_uses_camel_case_and_nulls() {
        let entry = FingerprintEntry {
            mtime_ms: Some(1.5),
            external_script: None,
            external_template: Some(ExternalFile {
                path: "src/t.html".into(),
                mtime_ms: 2.0,
            }),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mtimeMs": 1.5,
                "externalScript": null,
                "externalTemplate": { "path": "src/t.html", "mtimeMs": 2.0 }
            })
        );
    }
}
