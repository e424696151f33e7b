//! Lexical scopes of the file under edit.
//!
//! Scopes form a tree: a lookup starts at the innermost scope and walks
//! the parent chain outwards, so locals come before members, members before
//! file-level declarations and imports.

use super::ids::{ScopeId, SymbolId};

#[derive(Clone, Debug, Default)]
struct ScopeData {
    parent: Option<ScopeId>,
    /// Declaration whose body this scope is (function, class, ...).
    owner: Option<SymbolId>,
    /// Symbols declared in or imported into this scope, in declaration order.
    entries: Vec<SymbolId>,
}

/// Arena of lexical scopes.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope nested in `parent` (or a root when `None`).
    pub fn add_scope(&mut self, parent: Option<ScopeId>, owner: Option<SymbolId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            parent,
            owner,
            entries: Vec::new(),
        });
        id
    }

    /// Make `symbol` visible in `scope`.
    ///
    /// # Panics
    /// Panics if `scope` was not created by this tree.
    pub fn declare(&mut self, scope: ScopeId, symbol: SymbolId) {
        let entries = &mut self.scopes[scope.index()].entries;
        if !entries.contains(&symbol) {
            entries.push(symbol);
        }
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.index()).and_then(|data| data.parent)
    }

    /// `scope` followed by its ancestors, innermost first.
    pub fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let start = (scope.index() < self.scopes.len()).then_some(scope);
        std::iter::successors(start, move |&current| self.parent(current))
    }

    /// The nearest declaration owning `scope` or one of its ancestors.
    pub fn owner(&self, scope: ScopeId) -> Option<SymbolId> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.index()].owner)
    }

    /// Everything visible from `scope`, innermost first. A symbol declared
    /// in several scopes of the chain is reported once per scope.
    pub fn visible(&self, scope: ScopeId) -> impl Iterator<Item = SymbolId> + '_ {
        self.chain(scope)
            .flat_map(move |id| self.scopes[id.index()].entries.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
