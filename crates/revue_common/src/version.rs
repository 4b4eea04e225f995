//! Compiler version identifiers with `major.minor.patch` parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The version reported by the external component compiler.
///
/// Keeps the raw string (written verbatim into cache metadata so that any
/// change, including pre-release tags, invalidates the cache) alongside the
/// parsed numeric components used for variant selection.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompilerVersion {
    raw: String,
    major: u32,
    minor: u32,
    patch: u32,
}

impl CompilerVersion {
    /// Returns the version string exactly as reported.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the major version component.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor version component.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the patch version component.
    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Returns `true` if this version is at least `major.minor`.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Debug for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompilerVersion({})", self.raw)
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Error type for parsing version strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid compiler version: '{input}'")]
pub struct ParseVersionError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for CompilerVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseVersionError {
            input: s.to_string(),
        };

        // Pre-release and build suffixes ride along in `raw` only
        let core = s.split(['-', '+']).next().unwrap_or_default();
        let mut parts = core.split('.');
        let mut next = || -> Result<u32, ParseVersionError> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| err()),
                None => Ok(0),
            }
        };
        let major = next()?;
        let minor = next()?;
        let patch = next()?;

        Ok(Self {
            raw: s.to_string(),
            major,
            minor,
            patch,
        })
    }
}
