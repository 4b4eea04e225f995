//! Byte-offset ranges within registered sources.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte offset range within a source registered in the [`SourceDb`](crate::SourceDb).
///
/// Collaborator diagnostics (parser errors, template codegen errors) report
/// `start..end` offsets into the text they were given; a `Span` ties those
/// offsets to that text. `start` is inclusive and `end` is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The source this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A dummy span used when a diagnostic carries no location.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given file with the given byte range.
    ///
    /// Reversed ranges are normalized so that `start <= end`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self {
            file,
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Returns `true` if this is the dummy span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_range_is_normalized() {
        let file = FileId::from_raw(0);
        assert_eq!(Span::new(file, 20, 10), Span::new(file, 10, 20));
    }

    #[test]
    fn dummy_span() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(FileId::from_raw(0), 0, 0).is_dummy());
    }
}
