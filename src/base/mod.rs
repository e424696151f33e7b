//! Foundation types shared by every layer of the completion core.
//!
//! - [`FileId`] - Lightweight file handles
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`FilePosition`] - A cursor inside a file
//!
//! This module has NO dependencies on other quill modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{FilePosition, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
