//! Source file representation with line-start indexing and code frames.

use crate::file_id::FileId;
use std::path::PathBuf;

/// Number of context lines printed above and below a code frame range.
const FRAME_CONTEXT: usize = 2;

/// A source text registered with the [`SourceDb`](crate::SourceDb).
///
/// Stores the content along with precomputed line-start offsets for
/// efficient line/column resolution during diagnostic rendering.
pub struct SourceFile {
    /// The unique identifier for this file within the [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Returns the number of lines in the file.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    ///
    /// Uses binary search on the precomputed line-start offsets. Offsets past
    /// the end of the content clamp to the last position.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let byte_offset = byte_offset.min(self.content.len() as u32);
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Converts an offset in UTF-16 code units, as JavaScript tooling counts
    /// them, into a byte offset on a character boundary.
    ///
    /// Offsets inside a surrogate pair round up to the next character;
    /// offsets past the end clamp to the content length.
    pub fn byte_offset_from_utf16(&self, utf16_offset: usize) -> u32 {
        let mut units = 0;
        for (byte, ch) in self.content.char_indices() {
            if units >= utf16_offset {
                return byte as u32;
            }
            units += ch.len_utf16();
        }
        self.content.len() as u32
    }

    /// Returns a substring of the file content between byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Returns the text of a 0-indexed line without its line terminator.
    pub fn line_text(&self, line_idx: usize) -> &str {
        let start = self.line_starts[line_idx] as usize;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Renders a code frame for the byte range `start..end`.
    ///
    /// Shows the affected lines plus two lines of context on each side, each
    /// prefixed with a line-number gutter, and underlines the range with
    /// carets:
    ///
    /// ```text
    /// 1  |  <template>
    /// 2  |    <div></span>
    ///    |         ^^^^^^^
    /// 3  |  </template>
    /// ```
    pub fn code_frame(&self, start: u32, end: u32) -> String {
        let len = self.content.len() as u32;
        let start = start.min(len);
        let end = end.clamp(start, len);

        let (start_line, _) = self.line_col(start);
        let (end_line, _) = self.line_col(end);
        let first = (start_line as usize - 1).saturating_sub(FRAME_CONTEXT);
        let last = (end_line as usize - 1 + FRAME_CONTEXT).min(self.line_count() - 1);

        let mut out = Vec::new();
        for idx in first..=last {
            let text = self.line_text(idx);
            let number = (idx + 1).to_string();
            let pad = " ".repeat(3usize.saturating_sub(number.len()));
            out.push(format!("{number}{pad}|  {text}"));

            let line_no = idx as u32 + 1;
            if line_no < start_line || line_no > end_line {
                continue;
            }
            let line_start = self.line_starts[idx];
            let line_end = line_start + text.len() as u32;
            let from = ((start.max(line_start) - line_start) as usize).min(text.len());
            let to = (end.min(line_end).saturating_sub(line_start) as usize).clamp(from, text.len());
            let indent = text.get(..from).map_or(from, |s| s.chars().count());
            let width = text.get(from..to).map_or(to - from, |s| s.chars().count()).max(1);
            out.push(format!("   |  {}{}", " ".repeat(indent), "^".repeat(width)));
        }
        out.join("\n")
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
