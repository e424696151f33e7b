//! # quill-base
//!
//! Core library for code completion: the session that turns a caret in a
//! partially written file into deduplicated, prefix-filtered candidates.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Completion sessions (basic / smart), collector, keyword phases
//!   ↓
//! hir     → Semantic model: symbols, scopes, indices, visibility
//!   ↓
//! syntax  → Rowan syntax tree of the file under edit + caret queries
//!   ↓
//! base    → Primitives (FileId, TextRange, FilePosition)
//! ```

/// Foundation types: FileId, positions
pub mod base;

/// Semantic model consulted by completion
pub mod hir;

/// IDE features: completion
pub mod ide;

/// Syntax tree of the file under edit
pub mod syntax;

// Re-export foundation types
pub use base::{FileId, FilePosition, TextRange, TextSize};
