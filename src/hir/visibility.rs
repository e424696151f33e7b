//! Declared-visibility rules.

use super::ids::SymbolId;
use super::index::SymbolIndex;
use super::symbols::{Symbol, Visibility};

impl SymbolIndex {
    /// Whether `symbol` may be referenced from code inside `from`.
    ///
    /// Returns `None` when the symbol has no visibility concept, which
    /// callers treat as visible.
    pub fn is_visible_from(&self, symbol: &Symbol, from: &Symbol) -> Option<bool> {
        let visible = match symbol.visibility? {
            Visibility::Public => true,
            Visibility::Internal => symbol.module == from.module,
            Visibility::Private => match symbol.container {
                Some(container) => self.is_inside(from, container),
                // top-level private: visible in the declaring file
                None => symbol.id.file == from.id.file,
            },
            Visibility::Protected => match symbol.container {
                Some(container) => self
                    .enclosing_chain(from)
                    .any(|outer| self.is_subclass(outer, container)),
                None => false,
            },
        };
        Some(visible)
    }

    /// `from` followed by the declarations enclosing it.
    fn enclosing_chain<'a>(&'a self, from: &'a Symbol) -> impl Iterator<Item = SymbolId> + 'a {
        std::iter::successors(Some(from.id), move |&current| {
            self.get(current).and_then(|symbol| symbol.container)
        })
    }

    fn is_inside(&self, from: &Symbol, container: SymbolId) -> bool {
        self.enclosing_chain(from).any(|outer| outer == container)
    }
}
