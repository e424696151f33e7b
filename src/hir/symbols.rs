//! Semantic symbol descriptors.
//!
//! A [`Symbol`] is what resolution and the indices hand to completion: a
//! declaration with enough semantic facts to filter it (kind, visibility,
//! receiver) and to present it (name, type, parameters).

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use smol_str::SmolStr;

use super::ids::{ModuleId, SymbolId};

// ============================================================================
// TYPES
// ============================================================================

/// Display name of a resolved type (`Int`, `String`, `Unit`, ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeName(SmolStr);

impl TypeName {
    /// The top type; extensions declared on it apply to every receiver.
    pub const ANY: &'static str = "Any";

    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0 == Self::ANY
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SYMBOL KINDS
// ============================================================================

/// Kind of a class-like declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
}

impl ClassKind {
    /// Singletons have exactly one instance and are never instantiated.
    pub fn is_singleton(self) -> bool {
        matches!(self, ClassKind::Object | ClassKind::EnumEntry)
    }
}

/// Kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Package,
    Class(ClassKind),
    Function,
    /// Synthetic constructor converting a lambda into a single-method interface.
    SamConstructor,
    Property,
    LocalVariable,
    Parameter,
}

/// Declared visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    /// Visible inside the declaring module.
    Internal,
    /// Visible inside the container class and its subclasses.
    Protected,
    /// Visible inside the container (or the file, for top-level declarations).
    Private,
}

// ============================================================================
// KIND MASK
// ============================================================================

/// Bitset selecting which symbol categories a query returns.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindMask(u16);

impl KindMask {
    pub const NONE: KindMask = KindMask(0);
    /// Classes, interfaces, enum classes and annotation classes.
    pub const NON_SINGLETON_CLASSIFIERS: KindMask = KindMask(1 << 0);
    pub const OBJECTS: KindMask = KindMask(1 << 1);
    pub const ENUM_ENTRIES: KindMask = KindMask(1 << 2);
    pub const PACKAGES: KindMask = KindMask(1 << 3);
    pub const ORDINARY_FUNCTIONS: KindMask = KindMask(1 << 4);
    pub const EXTENSION_FUNCTIONS: KindMask = KindMask(1 << 5);
    pub const SAM_CONSTRUCTORS: KindMask = KindMask(1 << 6);
    /// Local variables, parameters and properties.
    pub const VARIABLES: KindMask = KindMask(1 << 7);

    pub const TYPES: KindMask = KindMask(Self::NON_SINGLETON_CLASSIFIERS.0 | Self::OBJECTS.0);
    pub const FUNCTIONS: KindMask = KindMask(
        Self::ORDINARY_FUNCTIONS.0 | Self::EXTENSION_FUNCTIONS.0 | Self::SAM_CONSTRUCTORS.0,
    );
    pub const ALL: KindMask = KindMask(0xff);

    const NAMES: [(KindMask, &'static str); 8] = [
        (Self::NON_SINGLETON_CLASSIFIERS, "NON_SINGLETON_CLASSIFIERS"),
        (Self::OBJECTS, "OBJECTS"),
        (Self::ENUM_ENTRIES, "ENUM_ENTRIES"),
        (Self::PACKAGES, "PACKAGES"),
        (Self::ORDINARY_FUNCTIONS, "ORDINARY_FUNCTIONS"),
        (Self::EXTENSION_FUNCTIONS, "EXTENSION_FUNCTIONS"),
        (Self::SAM_CONSTRUCTORS, "SAM_CONSTRUCTORS"),
        (Self::VARIABLES, "VARIABLES"),
    ];

    #[inline]
    pub const fn contains(self, other: KindMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: KindMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn union(self, other: KindMask) -> KindMask {
        KindMask(self.0 | other.0)
    }

    /// Whether `symbol`'s category is selected by this mask.
    pub fn accepts(self, symbol: &Symbol) -> bool {
        self.intersects(symbol.kind_mask())
    }
}

impl BitOr for KindMask {
    type Output = KindMask;

    fn bitor(self, rhs: KindMask) -> KindMask {
        self.union(rhs)
    }
}

impl BitOrAssign for KindMask {
    fn bitor_assign(&mut self, rhs: KindMask) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for KindMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

// ============================================================================
// SYMBOL
// ============================================================================

/// A value parameter of a callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    pub ty: TypeName,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A declaration as seen by completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// `None` for kinds without a visibility concept (packages, locals).
    pub visibility: Option<Visibility>,
    /// Enclosing class or function; `None` for top-level declarations.
    pub container: Option<SymbolId>,
    pub module: ModuleId,
    /// Value type of a variable, return type of a callable, or the type a
    /// classifier or enum entry denotes.
    pub ty: Option<TypeName>,
    /// Receiver type of an extension function.
    pub receiver: Option<TypeName>,
    pub parameters: Vec<Parameter>,
    /// Direct supertypes of a class.
    pub supertypes: Vec<SymbolId>,
    pub is_abstract: bool,
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        let name = name.into();
        let visibility = match kind {
            SymbolKind::Package | SymbolKind::LocalVariable | SymbolKind::Parameter => None,
            _ => Some(Visibility::Public),
        };
        let ty = match kind {
            SymbolKind::Class(_) => Some(TypeName::new(name.clone())),
            _ => None,
        };
        Self {
            id,
            name,
            kind,
            visibility,
            container: None,
            module: ModuleId::default(),
            ty,
            receiver: None,
            parameters: Vec::new(),
            supertypes: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn with_type(mut self, ty: impl Into<TypeName>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_container(mut self, container: SymbolId) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_module(mut self, module: ModuleId) -> Self {
        self.module = module;
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<TypeName>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_supertypes(mut self, supertypes: Vec<SymbolId>) -> Self {
        self.supertypes = supertypes;
        self
    }

    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn class_kind(&self) -> Option<ClassKind> {
        match self.kind {
            SymbolKind::Class(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_extension(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, SymbolKind::Function | SymbolKind::SamConstructor)
    }

    /// Functions, SAM constructors and properties: what a reference can
    /// call or read without naming a type.
    pub fn is_callable_or_property(&self) -> bool {
        self.is_callable() || self.kind == SymbolKind::Property
    }

    /// Declared outside any class or function body.
    pub fn is_top_level(&self) -> bool {
        self.container.is_none()
            && !matches!(
                self.kind,
                SymbolKind::LocalVariable | SymbolKind::Parameter
            )
    }

    /// The single [`KindMask`] category this symbol falls into.
    pub fn kind_mask(&self) -> KindMask {
        match self.kind {
            SymbolKind::Package => KindMask::PACKAGES,
            SymbolKind::Class(ClassKind::Object) => KindMask::OBJECTS,
            SymbolKind::Class(ClassKind::EnumEntry) => KindMask::ENUM_ENTRIES,
            SymbolKind::Class(_) => KindMask::NON_SINGLETON_CLASSIFIERS,
            SymbolKind::Function if self.is_extension() => KindMask::EXTENSION_FUNCTIONS,
            SymbolKind::Function => KindMask::ORDINARY_FUNCTIONS,
            SymbolKind::SamConstructor => KindMask::SAM_CONSTRUCTORS,
            SymbolKind::Property | SymbolKind::LocalVariable | SymbolKind::Parameter => {
                KindMask::VARIABLES
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;

    fn id(local: u32) -> SymbolId {
        SymbolId::new(FileId::new(0), local)
    }

    #[test]
    fn test_kind_mask_categories() {
        let entry = Symbol::new(id(0), "RED", SymbolKind::Class(ClassKind::EnumEntry));
        let ext = Symbol::new(id(1), "shout", SymbolKind::Function).with_receiver("String");
        let local = Symbol::new(id(2), "foo", SymbolKind::LocalVariable);

        assert!(KindMask::ENUM_ENTRIES.accepts(&entry));
        assert!(!KindMask::TYPES.accepts(&entry));
        assert!(KindMask::EXTENSION_FUNCTIONS.accepts(&ext));
        assert!(!KindMask::ORDINARY_FUNCTIONS.accepts(&ext));
        assert!(KindMask::VARIABLES.accepts(&local));
        assert!(KindMask::ALL.accepts(&local));
    }

    #[test]
    fn test_kind_mask_composites() {
        assert!(KindMask::FUNCTIONS.contains(KindMask::SAM_CONSTRUCTORS));
        assert!(!(KindMask::TYPES | KindMask::PACKAGES).intersects(KindMask::ENUM_ENTRIES));
        assert_eq!(
            format!("{:?}", KindMask::TYPES),
            "{NON_SINGLETON_CLASSIFIERS, OBJECTS}"
        );
    }

    #[test]
    fn test_symbol_defaults() {
        let class = Symbol::new(id(3), "Point", SymbolKind::Class(ClassKind::Class));
        assert_eq!(class.ty, Some(TypeName::from("Point")));
        assert_eq!(class.visibility, Some(Visibility::Public));
        assert!(class.is_top_level());

        let param = Symbol::new(id(4), "x", SymbolKind::Parameter);
        assert_eq!(param.visibility, None);
        assert!(!param.is_top_level());
    }

    #[test]
    fn test_singleton_kinds() {
        assert!(ClassKind::Object.is_singleton());
        assert!(ClassKind::EnumEntry.is_singleton());
        assert!(!ClassKind::EnumClass.is_singleton());
    }
}
