//! File identifiers for source files known to the host.

use std::fmt;

/// A lightweight handle for a source file.
///
/// The host assigns ids; the completion core only compares them. The file
/// under edit keeps its id, while the synthetic copy the resolver analyses
/// during completion gets a fresh one, which lets a [`SearchScope`] drop the
/// stale original without touching anything else.
///
/// [`SearchScope`]: crate::hir::SearchScope
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(pub u32);

impl FileId {
    /// Create a new FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_file_id_identity() {
        let original = FileId::new(1);
        let forked = FileId::new(2);

        assert_eq!(original, FileId::from(1));
        assert_ne!(original, forked);
        assert_eq!(forked.to_string(), "file#2");
    }

    #[test]
    fn test_file_id_set_membership() {
        let files: FxHashSet<FileId> = [1, 2, 1].into_iter().map(FileId::new).collect();
        assert_eq!(files.len(), 2);
    }
}
