/// A type as written in a variable declaration, e.g. `[Int!]!`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub enum TypeSyntax {
    Named {
        name: String,
        nullable: bool,
    },
    List {
        of: Box<TypeSyntax>,
        nullable: bool,
    },
}

impl TypeSyntax {
    pub fn nullable(&self) -> bool {
        match self {
            Self::Named { nullable, .. } | Self::List { nullable, .. } => *nullable,
        }
    }

    /// The innermost named type, e.g. `Int` for `[Int!]!`.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named { name, .. } => name.as_str(),
            Self::List { of, .. } => of.innermost_name(),
        }
    }

    pub(crate) fn into_non_null(self) -> Self {
        match self {
            Self::Named { name, .. } => Self::Named { name, nullable: false },
            Self::List { of, .. } => Self::List { of, nullable: false },
        }
    }
}

impl std::fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named { name, nullable } => write!(
                f,
                "{name}{}",
                if *nullable { "" } else { "!" },
            ),
            Self::List { of, nullable } => write!(
                f,
                "[{of}]{}",
                if *nullable { "" } else { "!" },
            ),
        }
    }
}
