//! Shared foundational types used across the revue component compiler.
//!
//! This crate provides the compiler version identifier used to select a
//! compiler variant and to invalidate the persistent cache, plus helpers for
//! the forward-slash paths stored in cache metadata.

#![warn(missing_docs)]

pub mod paths;
pub mod version;

pub use paths::{stored_path, to_slash};
pub use version::{CompilerVersion, ParseVersionError};
