//! The services a completion session consults.
//!
//! Each trait is one question the session asks about the world. The
//! in-memory [`SemanticModel`] answers all of them; hosts with their own
//! analysis engine implement the traits over it instead.

use crate::base::TextSize;
use crate::hir::{
    BuiltIns, ClassKind, KindMask, Parameter, ResolutionResult, ResolvedReference, SearchScope,
    SemanticModel, Symbol, TypeName,
};
use crate::syntax::SyntaxNode;

use super::collector::Collector;
use super::error::IndexError;
use super::expected_type::ExpectedTypeCompletion;
use super::item::LookupItem;
use super::keywords::StandardKeywords;
use super::matcher::PrefixMatcher;

// ============================================================================
// TRAITS
// ============================================================================

pub trait ReferenceResolver {
    /// Resolve the simple-name reference at `offset` in the (forked) file.
    fn resolve_reference_at(
        &self,
        file: &SyntaxNode,
        offset: TextSize,
    ) -> Option<(ResolvedReference, ResolutionResult)>;

    /// Parameters of the function called with `argument_list`.
    fn call_parameters(&self, argument_list: &SyntaxNode) -> Vec<Parameter>;
}

pub trait ScopeSymbols {
    fn visible_symbols(
        &self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        kind_mask: KindMask,
        name_filter: &PrefixMatcher,
        visibility: &dyn VisibilityFilter,
    ) -> Vec<Symbol>;
}

/// Project-wide symbol lookups, restricted to a [`SearchScope`].
pub trait GlobalIndex {
    fn top_level_callables(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
    ) -> Result<Vec<Symbol>, IndexError>;

    fn top_level_objects(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
    ) -> Result<Vec<Symbol>, IndexError>;

    /// Extensions callable on at least one of `receivers`.
    fn extensions(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
        receivers: &[TypeName],
    ) -> Result<Vec<Symbol>, IndexError>;

    fn all_type_declarations(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
        kind_filter: &dyn Fn(ClassKind) -> bool,
        visibility: &dyn VisibilityFilter,
    ) -> Result<Vec<Symbol>, IndexError>;
}

/// Declared-visibility rules.
pub trait VisibilityOracle {
    /// `None` when visibility cannot be determined.
    fn is_visible(&self, symbol: &Symbol, from: &Symbol) -> Option<bool>;
}

/// A session's visibility policy, handed to collaborators that filter.
pub trait VisibilityFilter {
    fn is_visible(&self, symbol: &Symbol) -> bool;
}

impl<F: Fn(&Symbol) -> bool> VisibilityFilter for F {
    fn is_visible(&self, symbol: &Symbol) -> bool {
        self(symbol)
    }
}

/// Maps a declaration to the candidates smart completion offers for it.
pub type DeclarationFilter<'a> = Box<dyn Fn(&Symbol) -> Vec<LookupItem> + 'a>;

/// What type-driven completion wants added at the caret.
pub struct SmartResult<'a> {
    /// Candidates offered regardless of scope (constructor calls, ...).
    pub additional_items: Vec<LookupItem>,
    /// `None` when only the additional items apply.
    pub declaration_filter: Option<DeclarationFilter<'a>>,
}

pub trait SmartCompletionOracle {
    /// `None` when smart completion has nothing to offer here.
    fn run<'a>(
        &'a self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        visibility: &dyn VisibilityFilter,
        file: &SyntaxNode,
    ) -> Option<SmartResult<'a>>;
}

pub trait KeywordCompletion {
    /// Add the keywords valid at `offset`; the collector applies the prefix.
    fn complete(&self, file: &SyntaxNode, offset: TextSize, collector: &mut Collector);
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Everything a session needs from the outside.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub resolver: &'a dyn ReferenceResolver,
    pub scope_symbols: &'a dyn ScopeSymbols,
    pub index: &'a dyn GlobalIndex,
    pub visibility: &'a dyn VisibilityOracle,
    pub smart: &'a dyn SmartCompletionOracle,
    pub keywords: &'a dyn KeywordCompletion,
    pub builtins: &'a BuiltIns,
}

impl<'a> Collaborators<'a> {
    /// Answer every question from one in-memory model.
    pub fn from_model(model: &'a SemanticModel, builtins: &'a BuiltIns) -> Self {
        Self {
            resolver: model,
            scope_symbols: model,
            index: model,
            visibility: model,
            smart: model,
            keywords: &StandardKeywords,
            builtins,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn ReferenceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_visibility(mut self, visibility: &'a dyn VisibilityOracle) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_index(mut self, index: &'a dyn GlobalIndex) -> Self {
        self.index = index;
        self
    }

    pub fn with_smart(mut self, smart: &'a dyn SmartCompletionOracle) -> Self {
        self.smart = smart;
        self
    }

    pub fn with_keywords(mut self, keywords: &'a dyn KeywordCompletion) -> Self {
        self.keywords = keywords;
        self
    }
}

// ============================================================================
// IN-MEMORY MODEL
// ============================================================================

impl ReferenceResolver for SemanticModel {
    fn resolve_reference_at(
        &self,
        file: &SyntaxNode,
        offset: TextSize,
    ) -> Option<(ResolvedReference, ResolutionResult)> {
        SemanticModel::resolve_reference_at(self, file, offset)
    }

    fn call_parameters(&self, argument_list: &SyntaxNode) -> Vec<Parameter> {
        SemanticModel::call_parameters(self, argument_list)
    }
}

impl ScopeSymbols for SemanticModel {
    fn visible_symbols(
        &self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        kind_mask: KindMask,
        name_filter: &PrefixMatcher,
        visibility: &dyn VisibilityFilter,
    ) -> Vec<Symbol> {
        SemanticModel::visible_symbols(
            self,
            reference,
            resolution,
            kind_mask,
            &|name| name_filter.prefix_matches(name),
            &|symbol| visibility.is_visible(symbol),
        )
    }
}

impl GlobalIndex for SemanticModel {
    fn top_level_callables(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
    ) -> Result<Vec<Symbol>, IndexError> {
        let filter = |name: &str| name_filter.prefix_matches(name);
        let found = self.index().top_level_callables(scope, &filter);
        Ok(found.into_iter().cloned().collect())
    }

    fn top_level_objects(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
    ) -> Result<Vec<Symbol>, IndexError> {
        let filter = |name: &str| name_filter.prefix_matches(name);
        let found = self.index().top_level_objects(scope, &filter);
        Ok(found.into_iter().cloned().collect())
    }

    fn extensions(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
        receivers: &[TypeName],
    ) -> Result<Vec<Symbol>, IndexError> {
        let filter = |name: &str| name_filter.prefix_matches(name);
        let found = self.index().extensions(scope, &filter, receivers);
        Ok(found.into_iter().cloned().collect())
    }

    fn all_type_declarations(
        &self,
        scope: &SearchScope,
        name_filter: &PrefixMatcher,
        kind_filter: &dyn Fn(ClassKind) -> bool,
        visibility: &dyn VisibilityFilter,
    ) -> Result<Vec<Symbol>, IndexError> {
        let filter = |name: &str| name_filter.prefix_matches(name);
        let found = self.index().all_type_declarations(scope, &filter, kind_filter);
        Ok(found
            .into_iter()
            .filter(|symbol| visibility.is_visible(symbol))
            .cloned()
            .collect())
    }
}

impl VisibilityOracle for SemanticModel {
    fn is_visible(&self, symbol: &Symbol, from: &Symbol) -> Option<bool> {
        self.index().is_visible_from(symbol, from)
    }
}

impl SmartCompletionOracle for SemanticModel {
    fn run<'a>(
        &'a self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        visibility: &dyn VisibilityFilter,
        file: &SyntaxNode,
    ) -> Option<SmartResult<'a>> {
        ExpectedTypeCompletion::new(self).run(reference, resolution, visibility, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{SourceRoot, SymbolKind};

    const EDITED: FileId = FileId(0);
    const LIBRARY: FileId = FileId(1);

    fn model() -> SemanticModel {
        let mut model = SemanticModel::new();
        model.declare(EDITED, |id| Symbol::new(id, "fossil", SymbolKind::Function));
        model.declare(LIBRARY, |id| Symbol::new(id, "format", SymbolKind::Function));
        model.declare(LIBRARY, |id| {
            Symbol::new(id, "formatWidth", SymbolKind::Property).with_type("Int")
        });
        model.declare(LIBRARY, |id| {
            Symbol::new(id, "formatted", SymbolKind::Function).with_receiver("Int")
        });
        model.declare(LIBRARY, |id| {
            Symbol::new(id, "Formatter", SymbolKind::Class(ClassKind::Object))
        });
        model.declare(LIBRARY, |id| {
            Symbol::new(id, "FormatStyle", SymbolKind::Class(ClassKind::EnumClass))
                .with_visibility(crate::hir::Visibility::Private)
        });
        model
    }

    fn scope() -> SearchScope {
        let mut root = SourceRoot::new();
        root.insert(EDITED, "/src/main.ql");
        root.insert(LIBRARY, "/src/util.ql");
        SearchScope::for_completion(root, EDITED)
    }

    fn names(answer: Result<Vec<Symbol>, IndexError>) -> Vec<String> {
        answer
            .unwrap()
            .into_iter()
            .map(|symbol| symbol.name.to_string())
            .collect()
    }

    #[test]
    fn test_model_answers_global_queries() {
        let model = model();
        let scope = scope();
        let matcher = PrefixMatcher::new("fo");

        assert_eq!(
            names(GlobalIndex::top_level_callables(&model, &scope, &matcher)),
            vec!["format", "formatWidth"]
        );
        assert_eq!(
            names(GlobalIndex::top_level_objects(&model, &scope, &matcher)),
            vec!["Formatter"]
        );
        assert_eq!(
            names(GlobalIndex::extensions(&model, &scope, &matcher, &[TypeName::from("Int")])),
            vec!["formatted"]
        );
        assert!(names(GlobalIndex::extensions(&model, &scope, &matcher, &[])).is_empty());
    }

    #[test]
    fn test_model_type_declarations_apply_visibility() {
        let model = model();
        let scope = scope();
        let matcher = PrefixMatcher::new("Fo");
        let every_kind = |_: ClassKind| true;

        let all = GlobalIndex::all_type_declarations(
            &model,
            &scope,
            &matcher,
            &every_kind,
            &|_: &Symbol| true,
        );
        assert_eq!(names(all), vec!["Formatter", "FormatStyle"]);

        let public_only = GlobalIndex::all_type_declarations(
            &model,
            &scope,
            &matcher,
            &every_kind,
            &|symbol: &Symbol| symbol.visibility != Some(crate::hir::Visibility::Private),
        );
        assert_eq!(names(public_only), vec!["Formatter"]);
    }
}
