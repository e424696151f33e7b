//! Completion candidates as presented to the user.

use std::fmt::Write as _;

use smol_str::SmolStr;

use crate::hir::{ClassKind, Parameter, Symbol, SymbolId, SymbolKind};

/// Kind of a completion candidate, used by hosts for icons and sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionItemKind {
    Keyword,
    Package,
    Class,
    Interface,
    Enum,
    EnumMember,
    Object,
    Annotation,
    Function,
    Constructor,
    Property,
    Variable,
    Parameter,
    NamedArgument,
}

impl CompletionItemKind {
    pub fn of(symbol: &Symbol) -> Self {
        match symbol.kind {
            SymbolKind::Package => Self::Package,
            SymbolKind::Class(ClassKind::Class) => Self::Class,
            SymbolKind::Class(ClassKind::Interface) => Self::Interface,
            SymbolKind::Class(ClassKind::EnumClass) => Self::Enum,
            SymbolKind::Class(ClassKind::EnumEntry) => Self::EnumMember,
            SymbolKind::Class(ClassKind::AnnotationClass) => Self::Annotation,
            SymbolKind::Class(ClassKind::Object) => Self::Object,
            SymbolKind::Function | SymbolKind::SamConstructor => Self::Function,
            SymbolKind::Property => Self::Property,
            SymbolKind::LocalVariable => Self::Variable,
            SymbolKind::Parameter => Self::Parameter,
        }
    }
}

/// Identity of a candidate for deduplication: the same declaration shown
/// the same way is offered once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CandidateKey {
    pub symbol: Option<SymbolId>,
    pub kind: CompletionItemKind,
    pub presentation: SmolStr,
}

/// A completion candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupItem {
    /// Text matched against the prefix.
    pub lookup: SmolStr,
    /// Text shown in the popup.
    pub presentation: SmolStr,
    /// Text inserted on acceptance.
    pub insert_text: SmolStr,
    pub kind: CompletionItemKind,
    pub symbol: Option<SymbolId>,
    pub type_text: Option<SmolStr>,
    /// Never auto-insert this item even when it is the only candidate.
    pub suppress_auto_insertion: bool,
}

impl LookupItem {
    pub fn keyword(text: &str) -> Self {
        Self {
            lookup: text.into(),
            presentation: text.into(),
            insert_text: text.into(),
            kind: CompletionItemKind::Keyword,
            symbol: None,
            type_text: None,
            suppress_auto_insertion: false,
        }
    }

    /// Callables render with their parameter list and insert `name()`.
    pub fn from_symbol(symbol: &Symbol) -> Self {
        let (presentation, insert_text) = if symbol.is_callable() {
            (
                SmolStr::new(format!("{}({})", symbol.name, render_parameters(&symbol.parameters))),
                SmolStr::new(format!("{}()", symbol.name)),
            )
        } else {
            (symbol.name.clone(), symbol.name.clone())
        };
        Self {
            lookup: symbol.name.clone(),
            presentation,
            insert_text,
            kind: CompletionItemKind::of(symbol),
            symbol: Some(symbol.id),
            type_text: symbol.ty.as_ref().map(|ty| SmolStr::new(ty.as_str())),
            suppress_auto_insertion: false,
        }
    }

    /// `Name()` for instantiating a class.
    pub fn constructor_call(class: &Symbol) -> Self {
        let call = SmolStr::new(format!("{}()", class.name));
        Self {
            lookup: class.name.clone(),
            presentation: call.clone(),
            insert_text: call,
            kind: CompletionItemKind::Constructor,
            symbol: Some(class.id),
            type_text: class.ty.as_ref().map(|ty| SmolStr::new(ty.as_str())),
            suppress_auto_insertion: false,
        }
    }

    /// `name = ` label for a named call argument.
    pub fn named_argument(parameter: &Parameter) -> Self {
        Self {
            lookup: parameter.name.clone(),
            presentation: SmolStr::new(format!("{} =", parameter.name)),
            insert_text: SmolStr::new(format!("{} = ", parameter.name)),
            kind: CompletionItemKind::NamedArgument,
            symbol: None,
            type_text: Some(SmolStr::new(parameter.ty.as_str())),
            suppress_auto_insertion: false,
        }
    }

    pub fn with_suppressed_auto_insertion(mut self, suppress: bool) -> Self {
        self.suppress_auto_insertion = suppress;
        self
    }

    pub fn key(&self) -> CandidateKey {
        CandidateKey {
            symbol: self.symbol,
            kind: self.kind,
            presentation: self.presentation.clone(),
        }
    }
}

fn render_parameters(parameters: &[Parameter]) -> String {
    let mut out = String::new();
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}: {}", parameter.name, parameter.ty);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;

    fn id(local: u32) -> SymbolId {
        SymbolId::new(FileId::new(0), local)
    }

    #[test]
    fn test_function_presentation() {
        let draw = Symbol::new(id(0), "draw", SymbolKind::Function)
            .with_type("Unit")
            .with_parameters(vec![Parameter::new("x", "Int"), Parameter::new("y", "Int")]);
        let item = LookupItem::from_symbol(&draw);

        assert_eq!(item.lookup, "draw");
        assert_eq!(item.presentation, "draw(x: Int, y: Int)");
        assert_eq!(item.insert_text, "draw()");
        assert_eq!(item.type_text.as_deref(), Some("Unit"));
        assert_eq!(item.kind, CompletionItemKind::Function);
    }

    #[test]
    fn test_key_distinguishes_presentation() {
        let point = Symbol::new(id(1), "Point", SymbolKind::Class(ClassKind::Class));
        let plain = LookupItem::from_symbol(&point);
        let ctor = LookupItem::constructor_call(&point);

        assert_ne!(plain.key(), ctor.key());
        assert_eq!(plain.key(), LookupItem::from_symbol(&point).with_suppressed_auto_insertion(true).key());
    }

    #[test]
    fn test_named_argument_item() {
        let item = LookupItem::named_argument(&Parameter::new("width", "Int"));
        assert_eq!(item.presentation, "width =");
        assert_eq!(item.insert_text, "width = ");
        assert_eq!(item.symbol, None);
    }
}
