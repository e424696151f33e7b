//! Syntax tree of the file under edit.
//!
//! Parsing is not done here: a host parser (or a test) produces the tree
//! through [`TreeBuilder`]. The completion core only walks it.

mod builder;
mod kind;
mod position;

pub use builder::TreeBuilder;
pub use kind::{QuillLanguage, SyntaxKind};
pub use position::{
    COMPLETION_MARKER, ancestor_of_kind, enclosing_type_reference, find_identifier_prefix,
    first_name_segment, is_in_modifier_list, is_selector_in_qualified, name_ref_at, name_ref_of,
    token_at,
};

pub type SyntaxNode = rowan::SyntaxNode<QuillLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<QuillLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<QuillLanguage>;
