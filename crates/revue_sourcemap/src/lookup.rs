//! Tracing generated positions back to their sources.
//!
//! [`sourcemap`] counts lines from 0. Positions handed out here count them
//! from 1, like the stack traces and editors they end up in.

use sourcemap::{SourceMap, Token};

/// A position in a text: 1-based line, 0-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column in UTF-16 code units, starting at 0.
    pub column: u32,
}

impl Position {
    /// Creates a position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A resolved original location with the source and name spelled out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source name as listed in the map.
    pub source: String,
    /// Position in that source.
    pub position: Position,
    /// Symbol name, if the mapping carries one.
    pub name: Option<String>,
}

impl SourceLocation {
    /// Creates a location without a symbol name.
    pub fn new(source: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            position: Position::new(line, column),
            name: None,
        }
    }
}

/// Traces a generated position (1-based line) back to its original location.
///
/// Picks the closest mapping at or before `column` on the same generated
/// line; positions before the first mapping of a line, and unmapped
/// segments, trace to nothing.
pub fn original_position_for(map: &SourceMap, line: u32, column: u32) -> Option<SourceLocation> {
    let token = mapped_token(map, line.checked_sub(1)?, column)?;
    Some(SourceLocation {
        source: token.get_source()?.to_string(),
        position: Position::new(token.get_src_line() + 1, token.get_src_col()),
        name: token.get_name().map(str::to_string),
    })
}

/// The mapped token covering a 0-based generated position.
pub(crate) fn mapped_token(map: &SourceMap, line: u32, column: u32) -> Option<Token<'_>> {
    let token = map.lookup_token(line, column)?;
    if token.get_dst_line() != line || token.get_source().is_none() {
        return None;
    }
    Some(token)
}

/// The embedded text of the source named `source`.
pub fn source_contents<'a>(map: &'a SourceMap, source: &str) -> Option<&'a str> {
    let idx = map.sources().position(|s| s == source)?;
    map.get_source_contents(idx as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcemap::SourceMapBuilder;

    fn two_segment_line() -> SourceMap {
        let mut builder = SourceMapBuilder::new(None);
        let src = builder.add_source("a.js");
        builder.add_raw(0, 0, 4, 0, Some(src), None, false);
        builder.add_raw(0, 10, 4, 7, Some(src), None, false);
        builder.add_raw(1, 4, 5, 0, Some(src), None, false);
        builder.add_raw(1, 8, 0, 0, None, None, false);
        builder.into_sourcemap()
    }

    #[test]
    fn closest_preceding_column_wins() {
        let map = two_segment_line();
        assert_eq!(
            original_position_for(&map, 1, 3).unwrap().position,
            Position::new(5, 0)
        );
        assert_eq!(
            original_position_for(&map, 1, 12).unwrap().position,
            Position::new(5, 7)
        );
    }

    #[test]
    fn before_first_segment_of_line_is_none() {
        let map = two_segment_line();
        assert!(original_position_for(&map, 2, 1).is_none());
        assert!(original_position_for(&map, 3, 0).is_none());
        assert!(original_position_for(&map, 0, 0).is_none());
    }

    #[test]
    fn unmapped_segment_traces_to_nothing() {
        let map = two_segment_line();
        assert!(original_position_for(&map, 2, 6).is_some());
        assert!(original_position_for(&map, 2, 9).is_none());
    }

    #[test]
    fn names_are_resolved() {
        let mut builder = SourceMapBuilder::new(None);
        let src = builder.add_source("App.vue");
        let name = builder.add_name("render");
        builder.add_raw(0, 9, 2, 2, Some(src), Some(name), false);
        let map = builder.into_sourcemap();

        let loc = original_position_for(&map, 1, 9).unwrap();
        assert_eq!(loc.name.as_deref(), Some("render"));
        assert_eq!(loc.position, Position::new(3, 2));
    }

    #[test]
    fn contents_are_found_by_source_name() {
        let mut builder = SourceMapBuilder::new(None);
        let b = builder.add_source("b.js");
        builder.add_source("a.js");
        builder.set_source_contents(b, Some("let b;"));
        let map = builder.into_sourcemap();
        assert_eq!(source_contents(&map, "b.js"), Some("let b;"));
        assert_eq!(source_contents(&map, "a.js"), None);
        assert_eq!(source_contents(&map, "c.js"), None);
    }
}
