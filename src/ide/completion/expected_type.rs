//! Type-driven candidates for the in-memory model.

use crate::hir::{
    ClassKind, ResolutionResult, ResolvedReference, SemanticModel, Symbol, SymbolIndex,
    SymbolKind, TypeName,
};
use crate::syntax::SyntaxNode;

use super::collaborators::{DeclarationFilter, SmartResult, VisibilityFilter};
use super::item::LookupItem;

/// Offers what fits the type the context expects at the caret.
///
/// Applies only where resolution recorded an expected type. Offers a
/// constructor call for a concrete class of that type and the object
/// itself for an object, and keeps declarations whose type conforms.
pub struct ExpectedTypeCompletion<'a> {
    model: &'a SemanticModel,
}

impl<'a> ExpectedTypeCompletion<'a> {
    pub fn new(model: &'a SemanticModel) -> Self {
        Self { model }
    }

    pub fn run(
        &self,
        reference: &ResolvedReference,
        resolution: &ResolutionResult,
        visibility: &dyn VisibilityFilter,
        _file: &SyntaxNode,
    ) -> Option<SmartResult<'a>> {
        let expected = resolution.expected_type_of(reference.syntax())?.clone();
        let index = self.model.index();

        let additional_items = index
            .class_by_type(&expected)
            .filter(|class| visibility.is_visible(class))
            .and_then(instantiation)
            .into_iter()
            .collect();

        let declaration_filter: DeclarationFilter<'a> =
            Box::new(move |symbol: &Symbol| offer_for(index, &expected, symbol));
        Some(SmartResult {
            additional_items,
            declaration_filter: Some(declaration_filter),
        })
    }
}

/// How a classifier produces a value of its own type, if it can.
fn instantiation(class: &Symbol) -> Option<LookupItem> {
    match class.class_kind()? {
        ClassKind::Class if !class.is_abstract => Some(LookupItem::constructor_call(class)),
        ClassKind::Object => Some(LookupItem::from_symbol(class)),
        _ => None,
    }
}

fn offer_for(index: &SymbolIndex, expected: &TypeName, symbol: &Symbol) -> Vec<LookupItem> {
    let conforms = |ty: &Option<TypeName>| {
        ty.as_ref()
            .is_some_and(|ty| index.is_subtype(ty, expected))
    };

    let offered = match symbol.kind {
        SymbolKind::Class(ClassKind::EnumEntry) => {
            let enum_type = symbol
                .container
                .and_then(|container| index.get(container))
                .and_then(|class| class.ty.clone());
            conforms(&enum_type).then(|| LookupItem::from_symbol(symbol))
        }
        SymbolKind::Class(_) if conforms(&symbol.ty) => instantiation(symbol),
        SymbolKind::Function
        | SymbolKind::Property
        | SymbolKind::LocalVariable
        | SymbolKind::Parameter
            if conforms(&symbol.ty) =>
        {
            Some(LookupItem::from_symbol(symbol))
        }
        _ => None,
    };
    offered.into_iter().collect()
}
