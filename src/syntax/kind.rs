use rowan::Language;

/// Unified syntax kind for tokens and nodes of the file under edit.
///
/// Only the shapes the completion core inspects get dedicated node kinds;
/// everything else a parser produces can be wrapped in [`SyntaxKind::Error`]
/// or a generic container without affecting completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    Comment,

    // --- Tokens ---
    Identifier,
    Keyword,
    Literal,
    Dot,
    Comma,
    Colon,
    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // --- Nodes ---
    SourceFile,
    ImportDirective,
    ClassDecl,
    FunctionDecl,
    PropertyDecl,
    ParameterList,
    Parameter,
    Block,
    ModifierList,
    TypeReference,
    /// A simple name used as a reference (`foo`, or the `bar` in `foo.bar`).
    NameRef,
    DotQualifiedExpr,
    CallExpr,
    ValueArgumentList,
    ValueArgument,
    /// The `name` in a named argument `name = value`.
    ValueArgumentName,
    Error,
}

impl SyntaxKind {
    const ALL: [SyntaxKind; 30] = [
        SyntaxKind::Whitespace,
        SyntaxKind::Comment,
        SyntaxKind::Identifier,
        SyntaxKind::Keyword,
        SyntaxKind::Literal,
        SyntaxKind::Dot,
        SyntaxKind::Comma,
        SyntaxKind::Colon,
        SyntaxKind::Eq,
        SyntaxKind::LParen,
        SyntaxKind::RParen,
        SyntaxKind::LBrace,
        SyntaxKind::RBrace,
        SyntaxKind::SourceFile,
        SyntaxKind::ImportDirective,
        SyntaxKind::ClassDecl,
        SyntaxKind::FunctionDecl,
        SyntaxKind::PropertyDecl,
        SyntaxKind::ParameterList,
        SyntaxKind::Parameter,
        SyntaxKind::Block,
        SyntaxKind::ModifierList,
        SyntaxKind::TypeReference,
        SyntaxKind::NameRef,
        SyntaxKind::DotQualifiedExpr,
        SyntaxKind::CallExpr,
        SyntaxKind::ValueArgumentList,
        SyntaxKind::ValueArgument,
        SyntaxKind::ValueArgumentName,
        SyntaxKind::Error,
    ];

    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for the edited source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuillLanguage {}

impl Language for QuillLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::ALL
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_kind_roundtrip() {
        for kind in SyntaxKind::ALL {
            assert_eq!(QuillLanguage::kind_from_raw(kind.into()), kind);
        }
        assert_eq!(
            QuillLanguage::kind_from_raw(rowan::SyntaxKind(999)),
            SyntaxKind::Error
        );
    }
}
