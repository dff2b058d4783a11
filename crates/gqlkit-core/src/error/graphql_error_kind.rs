/// Which stage of request handling (or schema construction) failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum GraphQLErrorKind {
    /// The document text is malformed, or names a directive the schema does
    /// not know.
    Syntax,

    /// The document is well-formed but does not fit the schema: unknown
    /// fields, fragments, types or variables, ambiguous operations,
    /// uncoercible literals.
    Request,

    /// A supplied argument set does not match a field's declared parameters.
    Validation,

    /// A resolver failed, a non-null position produced null, or a runtime
    /// value could not be matched to a type.
    Execution,

    /// Raised while building a schema; never raised per-request.
    Schema,
}

impl GraphQLErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Syntax => "SyntaxError",
            Self::Request => "RequestError",
            Self::Validation => "ValidationError",
            Self::Execution => "ExecutionError",
            Self::Schema => "SchemaError",
        }
    }
}

impl std::fmt::Display for GraphQLErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
