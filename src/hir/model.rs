//! In-memory semantic model: the symbol index, the lexical scopes of the
//! file under edit and the facts resolution attaches to its references.
//!
//! Hosts with a real analysis engine plug that in through the completion
//! collaborator traits instead; this model is what the tests and simple
//! hosts resolve against.

use rustc_hash::FxHashSet;

use super::ids::{ScopeId, SymbolId};
use super::index::{NameFilter, SymbolIndex};
use super::resolution::{ResolutionResult, ResolvedReference, ScopeFact};
use super::scopes::ScopeTree;
use super::symbols::{KindMask, Parameter, Symbol, TypeName};
use crate::base::{FileId, TextRange, TextSize};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// What resolution knows about every reference inside `range`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub range: TextRange,
    pub scope: ScopeId,
    /// Explicit receiver type of a qualified selector.
    pub receiver: Option<TypeName>,
    /// `this` receivers in effect, innermost first.
    pub implicit_receivers: Vec<TypeName>,
    pub expected_type: Option<TypeName>,
}

impl Binding {
    pub fn new(range: TextRange, scope: ScopeId) -> Self {
        Self {
            range,
            scope,
            receiver: None,
            implicit_receivers: Vec::new(),
            expected_type: None,
        }
    }

    pub fn with_receiver(mut self, ty: impl Into<TypeName>) -> Self {
        self.receiver = Some(ty.into());
        self
    }

    pub fn with_implicit_receivers(mut self, types: Vec<TypeName>) -> Self {
        self.implicit_receivers = types;
        self
    }

    pub fn with_expected_type(mut self, ty: impl Into<TypeName>) -> Self {
        self.expected_type = Some(ty.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct SemanticModel {
    index: SymbolIndex,
    scopes: ScopeTree,
    bindings: Vec<Binding>,
}

impl SemanticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut SymbolIndex {
        &mut self.index
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// Add a symbol declared in `file`, allocating its id.
    pub fn declare(&mut self, file: FileId, build: impl FnOnce(SymbolId) -> Symbol) -> SymbolId {
        let local = self
            .index
            .symbols_in_file(file)
            .iter()
            .map(|symbol| symbol.id.local + 1)
            .max()
            .unwrap_or(0);
        let symbol = build(SymbolId::new(file, local));
        let id = symbol.id;
        self.index.insert(symbol);
        id
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>, owner: Option<SymbolId>) -> ScopeId {
        self.scopes.add_scope(parent, owner)
    }

    /// Make an already declared (or imported) symbol visible in `scope`.
    pub fn bring_into_scope(&mut self, scope: ScopeId, symbol: SymbolId) {
        self.scopes.declare(scope, symbol);
    }

    pub fn bind(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    fn binding_for(&self, range: TextRange) -> Option<&Binding> {
        self.bindings
            .iter()
            .filter(|binding| binding.range.contains_range(range))
            .min_by_key(|binding| binding.range.len())
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Resolve the reference at `offset`; `None` when there is no
    /// reference or no binding covers it.
    pub fn resolve_reference_at(
        &self,
        file: &SyntaxNode,
        offset: TextSize,
    ) -> Option<(ResolvedReference, ResolutionResult)> {
        let reference = ResolvedReference::at(file, offset)?;
        let binding = self.binding_for(reference.range())?;
        let node = reference.syntax();

        let mut result = ResolutionResult::new();
        let owner = self
            .scopes
            .owner(binding.scope)
            .and_then(|id| self.index.get(id))
            .cloned();
        result.record_scope(
            node,
            ScopeFact {
                scope: binding.scope,
                owner,
            },
        );
        if let Some(receiver) = &binding.receiver {
            result.record_receiver(node, receiver.clone());
        }
        result.record_implicit_receivers(node, binding.implicit_receivers.clone());
        if let Some(expected) = &binding.expected_type {
            result.record_expected_type(node, expected.clone());
        }
        Some((reference, result))
    }

    /// Symbols reachable from the reference: members of the explicit
    /// receiver for a qualified selector, otherwise the lexical scope chain
    /// plus members of the implicit receivers. Extensions in scope are kept
    /// only when they apply to a receiver.
    pub fn visible_symbols(
        &self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        kind_mask: KindMask,
        name_filter: NameFilter<'_>,
        visibility: &dyn Fn(&Symbol) -> bool,
    ) -> Vec<Symbol> {
        let node = reference.syntax();
        let Some(fact) = resolution.scope_of(node) else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut push = |symbol: &Symbol| {
            if kind_mask.accepts(symbol)
                && name_filter(&symbol.name)
                && visibility(symbol)
                && seen.insert(symbol.id)
            {
                out.push(symbol.clone());
            }
        };

        let receivers = resolution.applicable_receivers(node);
        let in_scope = self
            .scopes
            .visible(fact.scope)
            .filter_map(|id| self.index.get(id));

        if let Some(explicit) = resolution.receiver_of(node) {
            for member in self.index.members_of(explicit) {
                push(member);
            }
            for symbol in in_scope.filter(|symbol| symbol.is_extension()) {
                if self.accepts_receiver(symbol, &receivers) {
                    push(symbol);
                }
            }
        } else {
            for symbol in in_scope {
                if !symbol.is_extension() || self.accepts_receiver(symbol, &receivers) {
                    push(symbol);
                }
            }
            for receiver in &receivers {
                for member in self.index.members_of(receiver) {
                    push(member);
                }
            }
        }
        out
    }

    fn accepts_receiver(&self, extension: &Symbol, receivers: &[TypeName]) -> bool {
        extension.receiver.as_ref().is_some_and(|declared| {
            receivers
                .iter()
                .any(|actual| self.index.is_subtype(actual, declared))
        })
    }

    /// Parameters of the callee of the call owning `argument_list`.
    ///
    /// The callee is looked up by name in the scope covering the call, then
    /// among members of the receiver, then among top-level functions.
    pub fn call_parameters(&self, argument_list: &SyntaxNode) -> Vec<Parameter> {
        let Some(name) = callee_name(argument_list) else {
            return Vec::new();
        };
        let binding = self.binding_for(argument_list.text_range());

        let from_scope = binding
            .into_iter()
            .flat_map(|binding| self.scopes.visible(binding.scope))
            .filter_map(|id| self.index.get(id));
        let from_receiver = binding
            .into_iter()
            .flat_map(|binding| binding.receiver.iter().chain(&binding.implicit_receivers))
            .flat_map(|receiver| self.index.members_of(receiver));
        let top_level = self
            .index
            .lookup_simple(&name)
            .into_iter()
            .filter(|symbol| symbol.is_top_level());

        from_scope
            .chain(from_receiver)
            .chain(top_level)
            .find(|symbol| symbol.is_callable() && symbol.name == name)
            .map(|symbol| symbol.parameters.clone())
            .unwrap_or_default()
    }
}

/// Simple name of the function called with `argument_list`.
fn callee_name(argument_list: &SyntaxNode) -> Option<String> {
    let call = argument_list
        .parent()
        .filter(|parent| parent.kind() == SyntaxKind::CallExpr)?;
    let callee = call.first_child()?;
    let name_ref = match callee.kind() {
        SyntaxKind::NameRef => callee,
        SyntaxKind::DotQualifiedExpr => callee
            .children()
            .filter(|child| child.kind() == SyntaxKind::NameRef)
            .last()?,
        _ => return None,
    };
    Some(name_ref.text().to_string())
}
