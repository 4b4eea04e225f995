//! Error types for source map decoding.

/// Errors raised while reading or writing a source map.
#[derive(Debug, thiserror::Error)]
pub enum SourceMapError {
    /// The map could not be decoded or encoded.
    #[error("invalid source map: {0}")]
    Map(#[from] sourcemap::Error),

    /// The map could not be moved in or out of a JSON value.
    #[error("invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An inline map comment is not valid base64.
    #[error("invalid inline source map encoding: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn display_base64_error() {
        let err: SourceMapError = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .unwrap_err()
            .into();
        assert!(err
            .to_string()
            .starts_with("invalid inline source map encoding: "));
    }
}
