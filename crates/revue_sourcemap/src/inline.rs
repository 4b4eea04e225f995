//! Inline `sourceMappingURL` comments.

use crate::error::SourceMapError;
use crate::json::to_bytes;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sourcemap::SourceMap;

/// Prefix of the trailing comment that embeds a map in generated code.
pub const INLINE_MAP_PREFIX: &str =
    "//# sourceMappingURL=data:application/json;charset=utf-8;base64,";

/// Encodes `map` as a base64 data-URL comment.
pub fn to_inline_comment(map: &SourceMap) -> Result<String, SourceMapError> {
    Ok(format!("{INLINE_MAP_PREFIX}{}", STANDARD.encode(to_bytes(map)?)))
}

/// Decodes the last inline map comment in `code`, if there is one.
pub fn extract_inline_map(code: &str) -> Result<Option<SourceMap>, SourceMapError> {
    let Some(encoded) = code
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix(INLINE_MAP_PREFIX))
    else {
        return Ok(None);
    };
    let bytes = STANDARD.decode(encoded)?;
    Ok(Some(SourceMap::from_slice(&bytes)?))
}
