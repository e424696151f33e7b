//! Source text positions and ranges.

use super::FileId;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// The caret a completion request was issued at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FilePosition {
    /// The physical file the user is editing.
    pub file: FileId,
    /// Byte offset of the caret.
    pub offset: TextSize,
}

impl FilePosition {
    pub const fn new(file: FileId, offset: TextSize) -> Self {
        Self { file, offset }
    }
}
