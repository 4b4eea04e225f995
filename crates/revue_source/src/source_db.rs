//! Registry of the source texts involved in one compile.

use crate::file_id::FileId;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::path::PathBuf;

/// Owns the source texts diagnostics point into: the component file itself
/// and any external template file whose content was handed to codegen.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Registers a source text under `name` and returns its [`FileId`].
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`], if registered.
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Renders the code frame for a span, or `None` for dummy or unknown spans.
    pub fn code_frame(&self, span: Span) -> Option<String> {
        if span.is_dummy() {
            return None;
        }
        let file = self.get_file(span.file)?;
        Some(file.code_frame(span.start, span.end))
    }

    /// Returns `true` if no sources have been registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
