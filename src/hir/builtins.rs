//! Built-in declarations of the language.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::SymbolId;
use super::symbols::{ClassKind, Symbol, SymbolKind};
use crate::base::FileId;

/// Registry of built-in classifiers, owned by the host and handed to each
/// completion session.
#[derive(Clone, Debug)]
pub struct BuiltIns {
    unit: Symbol,
    by_name: FxHashMap<SmolStr, Symbol>,
}

impl BuiltIns {
    /// Names of the built-in classifiers, `Unit` first.
    pub const NAMES: [&'static str; 8] = [
        "Unit", "Any", "Nothing", "Int", "Long", "Boolean", "String", "Double",
    ];

    /// Built-ins live in a reserved pseudo file.
    pub fn new(file: FileId) -> Self {
        let by_name: FxHashMap<SmolStr, Symbol> = Self::NAMES
            .iter()
            .enumerate()
            .map(|(local, &name)| {
                let symbol = Symbol::new(
                    SymbolId::new(file, local as u32),
                    name,
                    SymbolKind::Class(ClassKind::Class),
                );
                (symbol.name.clone(), symbol)
            })
            .collect();
        let unit = Symbol::new(SymbolId::new(file, 0), "Unit", SymbolKind::Class(ClassKind::Class));
        Self { unit, by_name }
    }

    /// The unit type, offered in type positions.
    pub fn unit(&self) -> &Symbol {
        &self.unit
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.by_name.values()
    }
}

impl Default for BuiltIns {
    fn default() -> Self {
        Self::new(FileId::new(u32::MAX))
    }
}
