//! Incremental construction of syntax trees.

use rowan::{GreenNodeBuilder, Language};

use super::{QuillLanguage, SyntaxKind, SyntaxNode};
use crate::base::TextSize;

/// Builds a syntax tree token by token while tracking the text offset.
///
/// Parsers feed it in source order. The builder can also remember one
/// offset (the caret), which keeps hand-written trees and caret offsets in
/// sync without counting bytes by hand.
pub struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
    len: TextSize,
    cursor: Option<TextSize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
            len: TextSize::from(0),
            cursor: None,
        }
    }

    /// Open a node of the given kind. Must be balanced by [`finish`](Self::finish).
    pub fn start(&mut self, kind: SyntaxKind) -> &mut Self {
        self.inner.start_node(QuillLanguage::kind_to_raw(kind));
        self
    }

    /// Close the most recently opened node.
    pub fn finish(&mut self) -> &mut Self {
        self.inner.finish_node();
        self
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        self.inner.token(QuillLanguage::kind_to_raw(kind), text);
        self.len += TextSize::of(text);
        self
    }

    pub fn ident(&mut self, text: &str) -> &mut Self {
        self.token(SyntaxKind::Identifier, text)
    }

    pub fn keyword(&mut self, text: &str) -> &mut Self {
        self.token(SyntaxKind::Keyword, text)
    }

    pub fn ws(&mut self) -> &mut Self {
        self.token(SyntaxKind::Whitespace, " ")
    }

    /// A complete `NameRef` node holding one identifier.
    pub fn name_ref(&mut self, text: &str) -> &mut Self {
        self.start(SyntaxKind::NameRef).ident(text).finish()
    }

    /// A `NameRef` whose identifier is being typed, with the caret right after it.
    pub fn typed_name_ref(&mut self, typed: &str) -> &mut Self {
        self.start(SyntaxKind::NameRef).ident(typed).mark_cursor().finish()
    }

    /// Remember the current end of text as the caret offset.
    pub fn mark_cursor(&mut self) -> &mut Self {
        self.cursor = Some(self.len);
        self
    }

    pub fn cursor(&self) -> Option<TextSize> {
        self.cursor
    }

    pub fn text_len(&self) -> TextSize {
        self.len
    }

    pub fn finish_tree(self) -> SyntaxNode {
        SyntaxNode::new_root(self.inner.finish())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
