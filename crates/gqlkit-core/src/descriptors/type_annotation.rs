/// A by-name type reference, e.g. `String!` or `[Hero]`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeAnnotation {
    List {
        of: Box<TypeAnnotation>,
        nullable: bool,
    },
    Named {
        name: String,
        nullable: bool,
    },
}

impl TypeAnnotation {
    /// A nullable reference to the type `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            nullable: true,
        }
    }

    /// A nullable list of `of`.
    pub fn list(of: TypeAnnotation) -> Self {
        Self::List {
            of: Box::new(of),
            nullable: true,
        }
    }

    /// This annotation made non-nullable.
    pub fn non_null(self) -> Self {
        match self {
            Self::List { of, .. } => Self::List { of, nullable: false },
            Self::Named { name, .. } => Self::Named { name, nullable: false },
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List { nullable, .. } | Self::Named { nullable, .. } => *nullable,
        }
    }

    /// The name of the type at the core of all wrappers.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::List { of, .. } => of.innermost_name(),
            Self::Named { name, .. } => name.as_str(),
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List { of, nullable } => write!(
                f,
                "[{of}]{}",
                if *nullable { "" } else { "!" },
            ),

            Self::Named { name, nullable } => write!(
                f,
                "{name}{}",
                if *nullable { "" } else { "!" },
            ),
        }
    }
}
