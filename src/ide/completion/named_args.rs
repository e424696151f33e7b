//! Named call-argument labels (`name = `).

use rustc_hash::FxHashSet;

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken, ancestor_of_kind};

use super::collaborators::ReferenceResolver;
use super::collector::Collector;
use super::item::LookupItem;

/// The unnamed argument the caret is typing the first name of.
fn unnamed_argument_at(token: &SyntaxToken) -> Option<SyntaxNode> {
    let argument = ancestor_of_kind(token, SyntaxKind::ValueArgument)?;
    if has_name(&argument) {
        return None;
    }
    let expression = argument
        .children()
        .find(|child| !child.kind().is_trivia())?;
    let token_node = token.parent()?;
    (expression.kind() == SyntaxKind::NameRef && expression == token_node).then_some(argument)
}

fn has_name(argument: &SyntaxNode) -> bool {
    argument
        .children()
        .any(|child| child.kind() == SyntaxKind::ValueArgumentName)
}

fn argument_name(argument: &SyntaxNode) -> Option<String> {
    let label = argument
        .children()
        .find(|child| child.kind() == SyntaxKind::ValueArgumentName)?;
    label
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::Identifier)
        .map(|token| token.text().to_string())
}

/// Whether only a named-argument label can follow here: the caret is in an
/// unnamed argument and an earlier argument of the same call is named, so
/// positional arguments are no longer allowed.
pub fn is_only_named_argument_expected(token: &SyntaxToken) -> bool {
    let Some(argument) = ancestor_of_kind(token, SyntaxKind::ValueArgument) else {
        return false;
    };
    if has_name(&argument) {
        return false;
    }
    argument
        .siblings(rowan::Direction::Prev)
        .skip(1)
        .filter(|sibling| sibling.kind() == SyntaxKind::ValueArgument)
        .any(|sibling| has_name(&sibling))
}

/// Offer `name = ` for every parameter of the called function that no
/// argument names yet.
pub fn complete(token: &SyntaxToken, resolver: &dyn ReferenceResolver, collector: &mut Collector) -> usize {
    let Some(argument) = unnamed_argument_at(token) else {
        return 0;
    };
    let Some(argument_list) = argument
        .parent()
        .filter(|parent| parent.kind() == SyntaxKind::ValueArgumentList)
    else {
        return 0;
    };

    let used: FxHashSet<String> = argument_list
        .children()
        .filter(|child| child.kind() == SyntaxKind::ValueArgument)
        .filter_map(|child| argument_name(&child))
        .collect();

    let parameters = resolver.call_parameters(&argument_list);
    collector.add_all(
        parameters
            .iter()
            .filter(|parameter| !used.contains(parameter.name.as_str()))
            .map(LookupItem::named_argument),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{TextSize, TextRange};
    use crate::hir::{Binding, Parameter, SemanticModel, Symbol, SymbolKind};
    use crate::ide::completion::PrefixMatcher;
    use crate::syntax::{TreeBuilder, token_at};

    /// `draw(x = 1, w|)`
    fn named_then_typing() -> (SyntaxNode, TextSize) {
        let mut b = TreeBuilder::new();
        b.start(SyntaxKind::SourceFile)
            .start(SyntaxKind::CallExpr)
            .name_ref("draw")
            .start(SyntaxKind::ValueArgumentList)
            .token(SyntaxKind::LParen, "(")
            .start(SyntaxKind::ValueArgument)
            .start(SyntaxKind::ValueArgumentName)
            .name_ref("x")
            .finish()
            .ws()
            .token(SyntaxKind::Eq, "=")
            .ws()
            .token(SyntaxKind::Literal, "1")
            .finish()
            .token(SyntaxKind::Comma, ",")
            .ws()
            .start(SyntaxKind::ValueArgument)
            .typed_name_ref("w")
            .finish()
            .token(SyntaxKind::RParen, ")")
            .finish()
            .finish()
            .finish();
        let caret = b.cursor().unwrap();
        (b.finish_tree(), caret)
    }

    #[test]
    fn test_named_argument_before_caret_forces_names() {
        let (root, caret) = named_then_typing();
        let token = token_at(&root, caret).unwrap();
        assert!(is_only_named_argument_expected(&token));
    }

    #[test]
    fn test_positional_arguments_allowed() {
        let mut b = TreeBuilder::new();
        b.start(SyntaxKind::SourceFile)
            .start(SyntaxKind::CallExpr)
            .name_ref("draw")
            .start(SyntaxKind::ValueArgumentList)
            .token(SyntaxKind::LParen, "(")
            .start(SyntaxKind::ValueArgument)
            .typed_name_ref("w")
            .finish()
            .token(SyntaxKind::RParen, ")")
            .finish()
            .finish()
            .finish();
        let caret = b.cursor().unwrap();
        let root = b.finish_tree();

        let token = token_at(&root, caret).unwrap();
        assert!(!is_only_named_argument_expected(&token));
    }

    #[test]
    fn test_offers_unused_parameter_labels() {
        let (root, caret) = named_then_typing();
        let mut model = SemanticModel::new();
        let draw = model.declare(crate::base::FileId(0), |id| {
            Symbol::new(id, "draw", SymbolKind::Function).with_parameters(vec![
                Parameter::new("x", "Int"),
                Parameter::new("width", "Int"),
                Parameter::new("height", "Int"),
            ])
        });
        let scope = model.add_scope(None, None);
        model.bring_into_scope(scope, draw);
        model.bind(Binding::new(TextRange::up_to(root.text_range().end()), scope));

        let token = token_at(&root, caret).unwrap();
        let mut collector = Collector::new(PrefixMatcher::new("w"));
        assert_eq!(complete(&token, &model, &mut collector), 1);
        let item = collector.items().next().unwrap();
        assert_eq!(item.insert_text, "width = ");
    }
}
