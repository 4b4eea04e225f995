//! Source map support for compiled components.
//!
//! A compiled component is stitched together from up to three independently
//! mapped pieces: the script as extracted by the descriptor parser, the
//! script as rewritten by the transpiler, and the render function produced by
//! template codegen. Maps themselves are [`sourcemap::SourceMap`]s; this
//! crate moves them to and from the collaborators' JSON ([`decode`],
//! [`encode`]), traces positions through them ([`original_position_for`]),
//! chains script maps ([`merge`]), lays the template map under the script
//! ([`compose`]) and embeds the result as a trailing comment
//! ([`to_inline_comment`]).

#![warn(missing_docs)]

pub mod compose;
pub mod error;
pub mod inline;
pub mod json;
pub mod lookup;
pub mod merge;

pub use compose::{compose, identity_line_map, template_line_offset};
pub use error::SourceMapError;
pub use inline::{extract_inline_map, to_inline_comment, INLINE_MAP_PREFIX};
pub use json::{decode, encode, to_bytes};
pub use lookup::{original_position_for, source_contents, Position, SourceLocation};
pub use merge::merge;
pub use sourcemap::{SourceMap, SourceMapBuilder};
