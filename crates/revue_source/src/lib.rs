//! Source file management, span tracking, and code frames for diagnostics.
//!
//! This crate provides the [`SourceDb`] holding the component files and
//! external blocks seen during a compile, [`FileId`] and [`Span`] types for
//! tracking byte ranges, and [`SourceFile::code_frame`] for the excerpts
//! printed under diagnostics.

#![warn(missing_docs)]

pub mod file_id;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
