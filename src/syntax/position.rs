//! Structural queries around the caret.
//!
//! The file under edit is broken by definition, so these never assume a
//! well-formed tree: every query answers from the nearest nodes that exist.

use rowan::{Direction, NodeOrToken, TokenAtOffset};
use unicode_ident::is_xid_continue;

use super::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::base::TextSize;

/// Placeholder identifier hosts splice into the forked copy at the caret
/// when nothing has been typed yet, so that the parser still produces a
/// `NameRef` there.
pub const COMPLETION_MARKER: &str = "QuillCompletionMarker";

/// The token the caret is touching.
///
/// On a boundary between two tokens the identifier wins, preferring the one
/// left of the caret (`fo|` completes `fo`). A caret past the end of the
/// tree touches nothing.
pub fn token_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    if !root.text_range().contains_inclusive(offset) {
        return None;
    }
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) => Some(token),
        TokenAtOffset::Between(left, right) => {
            let chosen = if left.kind() == SyntaxKind::Identifier {
                left
            } else if right.kind() == SyntaxKind::Identifier || left.kind().is_trivia() {
                right
            } else {
                left
            };
            Some(chosen)
        }
    }
}

/// The `NameRef` directly wrapping `token`, if the token is a reference name.
pub fn name_ref_of(token: &SyntaxToken) -> Option<SyntaxNode> {
    if token.kind() != SyntaxKind::Identifier {
        return None;
    }
    token.parent().filter(|p| p.kind() == SyntaxKind::NameRef)
}

/// The `NameRef` under the caret.
pub fn name_ref_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    token_at(root, offset).as_ref().and_then(name_ref_of)
}

/// Innermost ancestor of `token` with the given kind.
pub fn ancestor_of_kind(token: &SyntaxToken, kind: SyntaxKind) -> Option<SyntaxNode> {
    token
        .parent()
        .into_iter()
        .flat_map(|parent| parent.ancestors())
        .find(|node| node.kind() == kind)
}

pub fn enclosing_type_reference(token: &SyntaxToken) -> Option<SyntaxNode> {
    ancestor_of_kind(token, SyntaxKind::TypeReference)
}

/// First `NameRef` of a possibly qualified type path (`a` in `a.b.C`).
pub fn first_name_segment(type_ref: &SyntaxNode) -> Option<SyntaxNode> {
    type_ref
        .descendants()
        .find(|node| node.kind() == SyntaxKind::NameRef)
}

pub fn is_in_modifier_list(token: &SyntaxToken) -> bool {
    ancestor_of_kind(token, SyntaxKind::ModifierList).is_some()
}

/// Whether `name_ref` is the part after a `.` in a qualified expression or
/// qualified type path.
pub fn is_selector_in_qualified(name_ref: &SyntaxNode) -> bool {
    let qualified_parent = name_ref.parent().is_some_and(|parent| {
        matches!(
            parent.kind(),
            SyntaxKind::DotQualifiedExpr | SyntaxKind::TypeReference
        )
    });
    if !qualified_parent {
        return false;
    }

    name_ref
        .siblings_with_tokens(Direction::Prev)
        .skip(1)
        .find(|element| !element.kind().is_trivia())
        .is_some_and(|element| match element {
            NodeOrToken::Token(token) => token.kind() == SyntaxKind::Dot,
            NodeOrToken::Node(_) => false,
        })
}

/// The identifier text typed before `offset`.
///
/// Scans backwards over identifier characters, the way editors compute the
/// completion prefix from raw text.
pub fn find_identifier_prefix(text: &str, offset: TextSize) -> &str {
    let Some(head) = text.get(..usize::from(offset)) else {
        return "";
    };
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_xid_continue(c))
        .last()
        .map_or(head.len(), |(idx, _)| idx);
    &head[start..]
}
