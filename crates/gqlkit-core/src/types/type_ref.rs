use crate::types::TypeId;

/// A reference to a compiled type, possibly wrapped in `List`/`NonNull`.
///
/// The outermost wrapper governs the nullability of the position itself;
/// for lists, the element wrapper governs the nullability of each entry.
/// Lists of lists are rejected when the schema is compiled.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    Named(TypeId),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// This reference with any outer `NonNull` wrapper removed.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), Self::List(_))
    }

    /// The id of the named type at the core of all wrappers.
    pub fn innermost(&self) -> TypeId {
        match self {
            Self::Named(id) => *id,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost(),
        }
    }
}
