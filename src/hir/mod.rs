//! Semantic layer: symbols, scopes, indices and resolution facts.
//!
//! Everything completion knows about meaning comes through this module.
//! [`SemanticModel`] is a complete in-memory implementation; hosts with
//! their own analysis engine only need to provide the same answers.

mod builtins;
mod ids;
mod index;
mod input;
mod model;
mod resolution;
mod scopes;
mod symbols;
mod visibility;

pub use builtins::BuiltIns;
pub use ids::{ModuleId, ScopeId, SymbolId};
pub use index::{NameFilter, SymbolIndex};
pub use input::{SearchScope, SourceRoot};
pub use model::{Binding, SemanticModel};
pub use resolution::{ResolutionResult, ResolvedReference, ScopeFact};
pub use scopes::ScopeTree;
pub use symbols::{
    ClassKind, KindMask, Parameter, Symbol, SymbolKind, TypeName, Visibility,
};
