//! Reading block text, inline or from an external file.

use std::path::{Path, PathBuf};

use crate::descriptor::{Block, BlockKind, ScriptBlock};
use crate::error::CompileError;

/// The text of a block and, for external blocks, where it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBlock {
    /// Block text.
    pub content: String,
    /// The external file, joined onto the component's directory.
    pub external_path: Option<PathBuf>,
}

/// Anything with inline content or an external `src`.
pub trait BlockSource {
    /// Which block this is.
    fn kind(&self) -> BlockKind;
    /// Inline text.
    fn content(&self) -> &str;
    /// External reference, relative to the component file.
    fn src(&self) -> Option<&str>;
}

impl BlockSource for Block {
    fn kind(&self) -> BlockKind {
        self.kind
    }
    fn content(&self) -> &str {
        &self.content
    }
    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

impl BlockSource for ScriptBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Script
    }
    fn content(&self) -> &str {
        &self.content
    }
    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

/// Returns the text of `block`, reading its external file when it has one.
///
/// `src` is resolved against the directory of `filename`. A missing or
/// unreadable file is a [`CompileError::ReadBlock`].
pub fn resolve_block(block: &impl BlockSource, filename: &Path) -> Result<ResolvedBlock, CompileError> {
    let kind = block.kind().as_str();
    let Some(src) = block.src() else {
        tracing::info!(file = %filename.display(), "get {kind} content from inline block");
        return Ok(ResolvedBlock {
            content: block.content().to_string(),
            external_path: None,
        });
    };

    let path = filename.parent().unwrap_or_else(|| Path::new("")).join(src);
    tracing::info!(file = %filename.display(), "get {kind} content from external file '{}'", path.display());
    let content = std::fs::read_to_string(&path).map_err(|source| CompileError::ReadBlock {
        kind,
        path: path.clone(),
        source,
    })?;
    Ok(ResolvedBlock {
        content,
        external_path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_block_returns_content() {
        let block = Block::inline(BlockKind::Template, "<div/>");
        let resolved = resolve_block(&block, Path::new("/project/App.vue")).unwrap();
        assert_eq!(resolved.content, "<div/>");
        assert!(resolved.external_path.is_none());
    }

    #[test]
    fn external_block_is_read_relative_to_component() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/parts")).unwrap();
        std::fs::write(dir.path().join("src/parts/App.html"), "<p>hi</p>").unwrap();

        let block = Block::external(BlockKind::Template, "./parts/App.html");
        let resolved = resolve_block(&block, &dir.path().join("src/App.vue")).unwrap();
        assert_eq!(resolved.content, "<p>hi</p>");
        assert_eq!(
            resolved.external_path,
            Some(dir.path().join("src").join("./parts/App.html"))
        );
    }

    #[test]
    fn compiled_script_with_src() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("App.js"), "module.exports = {}").unwrap();
        let script = ScriptBlock {
            src: Some("App.js".into()),
            ..Default::default()
        };
        let resolved = resolve_block(&script, &dir.path().join("App.vue")).unwrap();
        assert_eq!(resolved.content, "module.exports = {}");
    }

    #[test]
    fn missing_external_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let block = Block::external(BlockKind::Script, "gone.js");
        let err = resolve_block(&block, &dir.path().join("App.vue")).unwrap_err();
        assert!(matches!(err, CompileError::ReadBlock { kind: "script", .. }));
        assert!(err.to_string().contains("gone.js"));
    }
}
