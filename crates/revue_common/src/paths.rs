//! Forward-slash paths for portable cache metadata.

use std::path::{Component, Path, MAIN_SEPARATOR};

/// Renders a relative path with `/` separators regardless of platform.
///
/// Root and prefix components are dropped.
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect();
    parts.join("/")
}

/// Renders `path` the way cache metadata records it.
///
/// Paths under `root` are stored relative to it. Paths elsewhere stay
/// absolute, so `root.join(stored)` always names the original file.
pub fn stored_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => to_slash(rel),
        Err(_) => path.to_string_lossy().replace(MAIN_SEPARATOR, "/"),
    }
}
