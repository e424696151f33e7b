//! The reference under the caret and what resolution found out about it.

use rustc_hash::FxHashMap;

use super::ids::ScopeId;
use super::symbols::{Symbol, TypeName};
use crate::base::{TextRange, TextSize};
use crate::syntax::{self, SyntaxKind, SyntaxNode};

/// The simple-name reference the caret is on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedReference {
    name_ref: SyntaxNode,
}

impl ResolvedReference {
    /// Find the reference at `offset` purely syntactically.
    pub fn at(file: &SyntaxNode, offset: TextSize) -> Option<Self> {
        syntax::name_ref_at(file, offset).map(|name_ref| Self { name_ref })
    }

    pub fn from_name_ref(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::NameRef).then_some(Self { name_ref: node })
    }

    /// The `NameRef` node.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.name_ref
    }

    pub fn range(&self) -> TextRange {
        self.name_ref.text_range()
    }

    pub fn text(&self) -> String {
        self.name_ref.text().to_string()
    }

    /// `bar` in `foo.bar`, as opposed to an unqualified `bar`.
    pub fn is_qualified_selector(&self) -> bool {
        syntax::is_selector_in_qualified(&self.name_ref)
    }
}

/// The lexical scope a node was resolved in, with its nearest declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeFact {
    pub scope: ScopeId,
    /// The declaration whose body contains the scope; the viewpoint for
    /// visibility checks.
    pub owner: Option<Symbol>,
}

type NodeKey = (TextRange, SyntaxKind);

fn key(node: &SyntaxNode) -> NodeKey {
    (node.text_range(), node.kind())
}

/// Semantic facts resolution attached to syntax nodes.
///
/// Produced once per completion session by the resolver and only read
/// afterwards.
#[derive(Clone, Debug, Default)]
pub struct ResolutionResult {
    scopes: FxHashMap<NodeKey, ScopeFact>,
    receivers: FxHashMap<NodeKey, TypeName>,
    implicit_receivers: FxHashMap<NodeKey, Vec<TypeName>>,
    expected_types: FxHashMap<NodeKey, TypeName>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scope(&mut self, node: &SyntaxNode, fact: ScopeFact) {
        self.scopes.insert(key(node), fact);
    }

    /// Type of the explicit receiver when `node` is a qualified selector.
    pub fn record_receiver(&mut self, node: &SyntaxNode, ty: TypeName) {
        self.receivers.insert(key(node), ty);
    }

    /// Types of the `this` receivers in effect at `node`, innermost first.
    pub fn record_implicit_receivers(&mut self, node: &SyntaxNode, types: Vec<TypeName>) {
        self.implicit_receivers.insert(key(node), types);
    }

    /// Type the context around `node` expects it to have.
    pub fn record_expected_type(&mut self, node: &SyntaxNode, ty: TypeName) {
        self.expected_types.insert(key(node), ty);
    }

    pub fn scope_of(&self, node: &SyntaxNode) -> Option<&ScopeFact> {
        self.scopes.get(&key(node))
    }

    pub fn containing_declaration(&self, node: &SyntaxNode) -> Option<&Symbol> {
        self.scope_of(node).and_then(|fact| fact.owner.as_ref())
    }

    pub fn receiver_of(&self, node: &SyntaxNode) -> Option<&TypeName> {
        self.receivers.get(&key(node))
    }

    pub fn implicit_receivers_of(&self, node: &SyntaxNode) -> &[TypeName] {
        self.implicit_receivers
            .get(&key(node))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn expected_type_of(&self, node: &SyntaxNode) -> Option<&TypeName> {
        self.expected_types.get(&key(node))
    }

    /// Receiver types an extension must accept to be callable at `node`:
    /// the explicit receiver of a qualified selector, else the implicit ones.
    pub fn applicable_receivers(&self, node: &SyntaxNode) -> Vec<TypeName> {
        match self.receiver_of(node) {
            Some(explicit) => vec![explicit.clone()],
            None => self.implicit_receivers_of(node).to_vec(),
        }
    }
}
