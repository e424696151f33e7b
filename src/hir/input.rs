//! Files visible to a completion request.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::FileId;

/// The set of source files the editor resolves a file against.
///
/// Set by the host; completion derives a [`SearchScope`] from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRoot {
    /// Map from FileId to file path (for display/log messages)
    files: IndexMap<FileId, Arc<str>, FxBuildHasher>,
}

impl SourceRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: FileId, path: impl Into<Arc<str>>) {
        self.files.insert(file, path.into());
    }

    pub fn remove(&mut self, file: FileId) -> Option<Arc<str>> {
        self.files.shift_remove(&file)
    }

    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|s| s.as_ref())
    }

    pub fn contains(&self, file: FileId) -> bool {
        self.files.contains_key(&file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str)> + '_ {
        self.files.iter().map(|(&id, path)| (id, path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The files global index queries may return symbols from.
///
/// Completion analyses a synthetic fork of the file under edit. The
/// physical file is still registered with the host under its own id, but
/// its indexed content is stale, so the scope excludes it: its
/// declarations reach completion through the fork's local resolution
/// instead.
#[derive(Clone, Debug)]
pub struct SearchScope {
    root: SourceRoot,
    excluded: Option<FileId>,
}

impl SearchScope {
    /// Every file of `root`.
    pub fn new(root: SourceRoot) -> Self {
        Self {
            root,
            excluded: None,
        }
    }

    /// Every file of `root` except the physical file under edit.
    pub fn for_completion(root: SourceRoot, original_file: FileId) -> Self {
        Self {
            root,
            excluded: Some(original_file),
        }
    }

    pub fn contains(&self, file: FileId) -> bool {
        self.excluded != Some(file) && self.root.contains(file)
    }

    pub fn excluded_file(&self) -> Option<FileId> {
        self.excluded
    }

    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.root
            .iter()
            .map(|(file, _)| file)
            .filter(|&file| self.excluded != Some(file))
    }
}
