//! Maps as the collaborators send and receive them.

use crate::error::SourceMapError;
use sourcemap::SourceMap;

/// Decodes a map carried as a JSON value in a collaborator response.
pub fn decode(value: &serde_json::Value) -> Result<SourceMap, SourceMapError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(SourceMap::from_slice(&bytes)?)
}

/// Serializes `map` to compact v3 JSON.
pub fn to_bytes(map: &SourceMap) -> Result<Vec<u8>, SourceMapError> {
    let mut bytes = Vec::new();
    map.to_writer(&mut bytes)?;
    Ok(bytes)
}

/// Encodes `map` as a JSON value, the shape collaborators exchange.
pub fn encode(map: &SourceMap) -> Result<serde_json::Value, SourceMapError> {
    Ok(serde_json::from_slice(&to_bytes(map)?)?)
}
