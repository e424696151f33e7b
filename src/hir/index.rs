//! Symbol index over every declaration the host knows about.
//!
//! Stores symbols by id and keeps secondary indices for the lookups
//! completion needs: by simple name, by file, and classifiers by the type
//! name they denote.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::ids::SymbolId;
use super::input::SearchScope;
use super::symbols::{ClassKind, Symbol, SymbolKind, TypeName};
use crate::base::FileId;

/// Predicate over simple names, usually a prefix matcher.
pub type NameFilter<'a> = &'a dyn Fn(&str) -> bool;

#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// The single source of truth for all symbols, in insertion order.
    symbols: IndexMap<SymbolId, Symbol, FxBuildHasher>,
    by_simple_name: FxHashMap<SmolStr, Vec<SymbolId>>,
    by_file: FxHashMap<FileId, Vec<SymbolId>>,
    /// Classifier denoting each type name; the first declaration wins.
    by_type_name: FxHashMap<TypeName, SymbolId>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the symbols of `file`.
    pub fn add_file(&mut self, file: FileId, symbols: Vec<Symbol>) {
        self.remove_file(file);
        for symbol in symbols {
            self.insert(symbol);
        }
    }

    /// Add a single symbol, replacing any previous symbol with the same id.
    pub fn insert(&mut self, symbol: Symbol) {
        let id = symbol.id;
        let replacing = self.symbols.contains_key(&id);
        if replacing {
            self.unlink(id);
        }

        self.by_simple_name
            .entry(symbol.name.clone())
            .or_default()
            .push(id);
        self.by_file.entry(id.file).or_default().push(id);
        let class_type = match symbol.kind {
            SymbolKind::Class(_) => symbol.ty.clone(),
            _ => None,
        };
        self.symbols.insert(id, symbol);

        if let Some(ty) = class_type {
            // a replaced symbol keeps its place in declaration order
            if replacing {
                self.relink_type(ty, None);
            } else {
                self.by_type_name.entry(ty).or_insert(id);
            }
        }
    }

    /// Remove all symbols from a file.
    pub fn remove_file(&mut self, file: FileId) {
        let Some(ids) = self.by_file.remove(&file) else {
            return;
        };
        for id in ids {
            self.unlink(id);
            self.symbols.shift_remove(&id);
        }
    }

    fn unlink(&mut self, id: SymbolId) {
        let Some(symbol) = self.symbols.get(&id) else {
            return;
        };
        if let Some(list) = self.by_simple_name.get_mut(&symbol.name) {
            list.retain(|&other| other != id);
            if list.is_empty() {
                self.by_simple_name.remove(&symbol.name);
            }
        }
        if let Some(list) = self.by_file.get_mut(&id.file) {
            list.retain(|&other| other != id);
        }
        let denoted = symbol
            .ty
            .clone()
            .filter(|ty| self.by_type_name.get(ty) == Some(&id));
        if let Some(ty) = denoted {
            self.relink_type(ty, Some(id));
        }
    }

    /// Point `ty` at the first remaining classifier declaring it.
    fn relink_type(&mut self, ty: TypeName, excluded: Option<SymbolId>) {
        let first = self
            .symbols
            .values()
            .find(|symbol| {
                Some(symbol.id) != excluded
                    && matches!(symbol.kind, SymbolKind::Class(_))
                    && symbol.ty.as_ref() == Some(&ty)
            })
            .map(|symbol| symbol.id);
        match first {
            Some(id) => {
                self.by_type_name.insert(ty, id);
            }
            None => {
                self.by_type_name.remove(&ty);
            }
        }
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    /// Look up all symbols with a simple name.
    pub fn lookup_simple(&self, name: &str) -> Vec<&Symbol> {
        self.by_simple_name
            .get(name)
            .map(|ids| ids.iter().filter_map(|id| self.symbols.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn symbols_in_file(&self, file: FileId) -> Vec<&Symbol> {
        self.by_file
            .get(&file)
            .map(|ids| ids.iter().filter_map(|id| self.symbols.get(id)).collect())
            .unwrap_or_default()
    }

    /// The classifier denoting `ty`.
    pub fn class_by_type(&self, ty: &TypeName) -> Option<&Symbol> {
        self.by_type_name
            .get(ty)
            .and_then(|id| self.symbols.get(id))
    }

    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.by_file.values().filter(|ids| !ids.is_empty()).count()
    }

    // ========================================================================
    // GLOBAL QUERIES
    // ========================================================================

    fn in_scope<'a>(
        &'a self,
        scope: &'a SearchScope,
        name_filter: NameFilter<'a>,
    ) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols
            .values()
            .filter(move |symbol| scope.contains(symbol.id.file) && name_filter(&symbol.name))
    }

    /// Top-level non-extension functions and properties.
    pub fn top_level_callables<'a>(
        &'a self,
        scope: &'a SearchScope,
        name_filter: NameFilter<'a>,
    ) -> Vec<&'a Symbol> {
        self.in_scope(scope, name_filter)
            .filter(|symbol| {
                symbol.is_top_level() && symbol.is_callable_or_property() && !symbol.is_extension()
            })
            .collect()
    }

    /// Top-level `object` declarations.
    pub fn top_level_objects<'a>(
        &'a self,
        scope: &'a SearchScope,
        name_filter: NameFilter<'a>,
    ) -> Vec<&'a Symbol> {
        self.in_scope(scope, name_filter)
            .filter(|symbol| {
                symbol.is_top_level() && symbol.class_kind() == Some(ClassKind::Object)
            })
            .collect()
    }

    /// Top-level extension functions and properties applicable to at least
    /// one of `receivers`.
    ///
    /// An extension declared on `Any` applies to every receiver; one declared
    /// on a class applies to that class and its subclasses.
    pub fn extensions<'a>(
        &'a self,
        scope: &'a SearchScope,
        name_filter: NameFilter<'a>,
        receivers: &'a [TypeName],
    ) -> Vec<&'a Symbol> {
        self.in_scope(scope, name_filter)
            .filter(|symbol| symbol.is_top_level() && symbol.is_callable_or_property())
            .filter(|symbol| match &symbol.receiver {
                Some(declared) => receivers
                    .iter()
                    .any(|actual| self.is_subtype(actual, declared)),
                None => false,
            })
            .collect()
    }

    /// Every class-like declaration, nested ones included, accepted by
    /// `kind_filter`.
    pub fn all_type_declarations<'a>(
        &'a self,
        scope: &'a SearchScope,
        name_filter: NameFilter<'a>,
        kind_filter: &'a dyn Fn(ClassKind) -> bool,
    ) -> Vec<&'a Symbol> {
        self.in_scope(scope, name_filter)
            .filter(|symbol| symbol.class_kind().is_some_and(kind_filter))
            .collect()
    }

    // ========================================================================
    // TYPE HIERARCHY
    // ========================================================================

    /// Whether a value of type `sub` can be used where `sup` is expected.
    pub fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        if sup.is_any() || sub == sup {
            return true;
        }
        match (self.class_by_type(sub), self.class_by_type(sup)) {
            (Some(sub), Some(sup)) => self.is_subclass(sub.id, sup.id),
            _ => false,
        }
    }

    /// Whether `class` is `ancestor` or transitively inherits from it.
    pub fn is_subclass(&self, class: SymbolId, ancestor: SymbolId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![class];
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(symbol) = self.symbols.get(&current) {
                stack.extend(symbol.supertypes.iter().copied());
            }
        }
        false
    }

    /// Members of the class denoting `ty`, then inherited ones. A member
    /// hidden by a same-named member of a subclass is still listed.
    pub fn members_of(&self, ty: &TypeName) -> Vec<&Symbol> {
        let Some(class) = self.class_by_type(ty) else {
            return Vec::new();
        };

        let mut visited = FxHashSet::default();
        let mut queue = vec![class.id];
        let mut members = Vec::new();
        while let Some(current) = queue.pop() {
            if !visited.insert(current) {
                continue;
            }
            members.extend(
                self.symbols
                    .values()
                    .filter(|symbol| symbol.container == Some(current)),
            );
            if let Some(symbol) = self.symbols.get(&current) {
                queue.extend(symbol.supertypes.iter().rev().copied());
            }
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::input::SourceRoot;

    fn id(file: u32, local: u32) -> SymbolId {
        SymbolId::new(FileId::new(file), local)
    }

    fn scope() -> SearchScope {
        let mut root = SourceRoot::new();
        root.insert(FileId::new(0), "/src/main.ql");
        root.insert(FileId::new(1), "/src/util.ql");
        SearchScope::for_completion(root, FileId::new(0))
    }

    fn any(_: &str) -> bool {
        true
    }

    #[test]
    fn test_add_and_remove_file() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(1),
            vec![
                Symbol::new(id(1, 0), "foo", SymbolKind::Function),
                Symbol::new(id(1, 1), "foo", SymbolKind::Property),
            ],
        );
        assert_eq!(index.lookup_simple("foo").len(), 2);
        assert_eq!(index.file_count(), 1);

        index.remove_file(FileId::new(1));
        assert!(index.is_empty());
        assert!(index.lookup_simple("foo").is_empty());
    }

    #[test]
    fn test_queries_respect_search_scope() {
        let mut index = SymbolIndex::new();
        index.insert(Symbol::new(id(0, 0), "stale", SymbolKind::Function));
        index.insert(Symbol::new(id(1, 0), "fresh", SymbolKind::Function));
        index.insert(Symbol::new(id(1, 1), "Config", SymbolKind::Class(ClassKind::Object)));

        let scope = scope();
        let callables = index.top_level_callables(&scope, &any);
        assert_eq!(callables.len(), 1);
        assert_eq!(callables[0].name, "fresh");

        let objects = index.top_level_objects(&scope, &|name| name.starts_with("Con"));
        assert_eq!(objects.len(), 1);
        assert!(index.top_level_objects(&scope, &|name| name.starts_with("x")).is_empty());
    }

    #[test]
    fn test_top_level_callables_include_properties() {
        let mut index = SymbolIndex::new();
        index.insert(Symbol::new(id(1, 0), "fetch", SymbolKind::Function));
        index.insert(Symbol::new(id(1, 1), "fetchLimit", SymbolKind::Property).with_type("Int"));
        index.insert(
            Symbol::new(id(1, 2), "fetched", SymbolKind::Property)
                .with_type("Int")
                .with_receiver("String"),
        );
        index.insert(Symbol::new(id(1, 3), "Fetcher", SymbolKind::Class(ClassKind::Class)));

        let scope = scope();
        let names: Vec<_> = index
            .top_level_callables(&scope, &any)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["fetch", "fetchLimit"]);
    }

    #[test]
    fn test_extension_properties_are_found() {
        let mut index = SymbolIndex::new();
        index.insert(
            Symbol::new(id(1, 0), "sizeInBits", SymbolKind::Property)
                .with_type("Int")
                .with_receiver("Int"),
        );
        let member = Symbol::new(id(1, 1), "Holder", SymbolKind::Class(ClassKind::Class));
        index.insert(member);
        index.insert(
            Symbol::new(id(1, 2), "sizeHint", SymbolKind::Property)
                .with_receiver("Int")
                .with_container(id(1, 1)),
        );

        let receivers = [TypeName::from("Int")];
        let scope = scope();
        let names: Vec<_> = index
            .extensions(&scope, &any, &receivers)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["sizeInBits"]);
    }

    #[test]
    fn test_type_name_moves_to_next_declaration() {
        let mut index = SymbolIndex::new();
        index.insert(Symbol::new(id(0, 0), "Widget", SymbolKind::Class(ClassKind::Class)));
        index.insert(Symbol::new(id(1, 0), "Widget", SymbolKind::Class(ClassKind::Interface)));
        index.insert(Symbol::new(id(1, 1), "Gadget", SymbolKind::Class(ClassKind::Class)));
        let widget = TypeName::from("Widget");
        assert_eq!(index.class_by_type(&widget).unwrap().id, id(0, 0));

        index.remove_file(FileId::new(0));
        assert_eq!(index.class_by_type(&widget).unwrap().id, id(1, 0));

        index.remove_file(FileId::new(1));
        assert!(index.class_by_type(&widget).is_none());
        assert!(index.class_by_type(&TypeName::from("Gadget")).is_none());
    }

    #[test]
    fn test_replacing_first_declaration_keeps_its_type_name() {
        let mut index = SymbolIndex::new();
        index.insert(Symbol::new(id(1, 0), "Widget", SymbolKind::Class(ClassKind::Class)));
        index.insert(Symbol::new(id(1, 1), "Widget", SymbolKind::Class(ClassKind::Object)));

        index.insert(Symbol::new(id(1, 0), "Widget", SymbolKind::Class(ClassKind::Interface)));

        let widget = index.class_by_type(&TypeName::from("Widget")).unwrap();
        assert_eq!(widget.id, id(1, 0));
        assert_eq!(widget.class_kind(), Some(ClassKind::Interface));
    }

    #[test]
    fn test_extensions_follow_receiver_hierarchy() {
        let mut index = SymbolIndex::new();
        let shape = Symbol::new(id(1, 0), "Shape", SymbolKind::Class(ClassKind::Interface));
        let circle = Symbol::new(id(1, 1), "Circle", SymbolKind::Class(ClassKind::Class))
            .with_supertypes(vec![shape.id]);
        index.insert(shape);
        index.insert(circle);
        index.insert(Symbol::new(id(1, 2), "area", SymbolKind::Function).with_receiver("Shape"));
        index.insert(Symbol::new(id(1, 3), "dump", SymbolKind::Function).with_receiver("Any"));
        index.insert(Symbol::new(id(1, 4), "shout", SymbolKind::Function).with_receiver("String"));

        let scope = scope();
        let receivers = [TypeName::from("Circle")];
        let names: Vec<_> = index
            .extensions(&scope, &any, &receivers)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["area", "dump"]);
        assert!(index.extensions(&scope, &any, &[]).is_empty());
    }

    #[test]
    fn test_members_include_inherited() {
        let mut index = SymbolIndex::new();
        let base = Symbol::new(id(1, 0), "Base", SymbolKind::Class(ClassKind::Class));
        let derived = Symbol::new(id(1, 1), "Derived", SymbolKind::Class(ClassKind::Class))
            .with_supertypes(vec![base.id]);
        index.insert(base);
        index.insert(derived);
        index.insert(Symbol::new(id(1, 2), "size", SymbolKind::Property).with_container(id(1, 0)));
        index.insert(Symbol::new(id(1, 3), "grow", SymbolKind::Function).with_container(id(1, 1)));

        let names: Vec<_> = index
            .members_of(&TypeName::from("Derived"))
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["grow", "size"]);
        assert!(index.members_of(&TypeName::from("Missing")).is_empty());
    }

    #[test]
    fn test_type_declarations_include_nested() {
        let mut index = SymbolIndex::new();
        index.insert(Symbol::new(id(1, 0), "Color", SymbolKind::Class(ClassKind::EnumClass)));
        index.insert(
            Symbol::new(id(1, 1), "RED", SymbolKind::Class(ClassKind::EnumEntry))
                .with_container(id(1, 0)),
        );

        let scope = scope();
        let all = index.all_type_declarations(&scope, &any, &|_| true);
        assert_eq!(all.len(), 2);
        let no_entries =
            index.all_type_declarations(&scope, &any, &|kind| kind != ClassKind::EnumEntry);
        assert_eq!(no_entries.len(), 1);
    }
}
