//! Semantic identifiers.

use std::fmt;

use crate::base::FileId;

/// A globally unique identifier for a declared symbol.
///
/// Combines the file where the declaration lives with a file-local ID.
/// Two lookups that reach the same declaration through different routes
/// (local scope, global index, extension index) yield equal ids, which is
/// what completion deduplicates on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolId {
    /// The file containing this declaration
    pub file: FileId,
    /// The local ID within the file
    pub local: u32,
}

impl SymbolId {
    #[inline]
    pub const fn new(file: FileId, local: u32) -> Self {
        Self { file, local }
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({:?}:{})", self.file, self.local)
    }
}

/// Identifier of a lexical scope in a [`ScopeTree`](super::ScopeTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct ScopeId(pub u32);

impl ScopeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a compilation module; `internal` declarations are visible
/// only inside their module.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Default)]
pub struct ModuleId(pub u32);
