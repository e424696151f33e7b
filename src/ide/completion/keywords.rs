//! Keyword candidates.

use crate::base::TextSize;
use crate::syntax::{
    self, SyntaxKind, SyntaxNode, SyntaxToken, enclosing_type_reference, is_in_modifier_list,
};

use super::collaborators::KeywordCompletion;
use super::collector::Collector;
use super::item::LookupItem;

/// Modifiers, valid in front of a declaration.
pub const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "abstract", "open", "final", "override",
    "data", "enum", "inner", "sealed", "inline", "suspend",
];

/// Keywords that start a declaration.
pub const DECLARATION_KEYWORDS: &[&str] = &["class", "interface", "object", "fun", "val", "var"];

/// Keywords valid only at file level.
pub const FILE_KEYWORDS: &[&str] = &["package", "import", "typealias"];

/// Keywords valid inside a function body.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "when", "while", "for", "do", "return", "break", "continue", "throw",
    "try", "null", "true", "false", "this", "super", "is", "in", "as",
];

/// Which keyword group applies at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeywordContext {
    None,
    Modifiers,
    FileLevel,
    ClassBody,
    Statement,
}

fn context_at(token: Option<&SyntaxToken>) -> KeywordContext {
    let Some(token) = token else {
        return KeywordContext::FileLevel;
    };
    if is_in_modifier_list(token) {
        return KeywordContext::Modifiers;
    }
    if enclosing_type_reference(token).is_some() {
        return KeywordContext::None;
    }
    let after_dot = syntax::name_ref_of(token)
        .as_ref()
        .is_some_and(syntax::is_selector_in_qualified);
    if after_dot {
        return KeywordContext::None;
    }

    for node in token.parent_ancestors() {
        match node.kind() {
            SyntaxKind::Block | SyntaxKind::ValueArgument => return KeywordContext::Statement,
            SyntaxKind::ClassDecl => return KeywordContext::ClassBody,
            _ => {}
        }
    }
    KeywordContext::FileLevel
}

/// Keyword completion by syntactic context.
///
/// Modifiers inside a modifier list; nothing after a `.` or in a type
/// position; statements and local declarations in bodies; member
/// declarations and modifiers in a class body; everything declarative at
/// file level.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardKeywords;

impl StandardKeywords {
    fn keywords(context: KeywordContext) -> Vec<&'static str> {
        let groups: &[&[&str]] = match context {
            KeywordContext::None => &[],
            KeywordContext::Modifiers => &[MODIFIER_KEYWORDS],
            KeywordContext::Statement => &[STATEMENT_KEYWORDS, DECLARATION_KEYWORDS],
            KeywordContext::ClassBody => &[DECLARATION_KEYWORDS, MODIFIER_KEYWORDS],
            KeywordContext::FileLevel => &[FILE_KEYWORDS, DECLARATION_KEYWORDS, MODIFIER_KEYWORDS],
        };
        groups.iter().flat_map(|group| group.iter().copied()).collect()
    }
}

impl KeywordCompletion for StandardKeywords {
    fn complete(&self, file: &SyntaxNode, offset: TextSize, collector: &mut Collector) {
        let token = syntax::token_at(file, offset);
        let context = context_at(token.as_ref());
        for keyword in Self::keywords(context) {
            collector.add(LookupItem::keyword(keyword));
        }
    }
}
