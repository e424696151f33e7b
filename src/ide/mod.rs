//! IDE features: high-level APIs for editor requests.
//!
//! This module sits between the semantic model (HIR) and the editor
//! protocol layer of a host. Each entry point corresponds to one request.
//!
//! ## Design Principles
//!
//! 1. **Data in, data out**: results go to a sink the host owns
//! 2. **No protocol types**: hosts convert at their boundary
//! 3. **Pluggable semantics**: built on collaborator traits, with HIR as the
//!    in-memory implementation

pub mod completion;

pub use completion::{
    Collaborators, CompletionItemKind, CompletionParameters, CompletionResultSet,
    CompletionSession, CompletionSessionConfiguration, CompletionSink, CompletionStrategy,
    LookupItem,
};
