use crate::GraphQLErrorKind;
use crate::schema::SchemaBuildError;
use gqlkit_parser::ParseError;

/// The single error a failed request (or schema build) collapses to.
///
/// Renders as `"<KindName>: <message>"`, which is also the `message` of the
/// error envelope produced by [`Schema::execute()`](crate::schema::Schema::execute).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GraphQLError {
    kind: GraphQLErrorKind,
    message: String,
}

impl GraphQLError {
    pub fn new(kind: GraphQLErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(GraphQLErrorKind::Syntax, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(GraphQLErrorKind::Request, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(GraphQLErrorKind::Validation, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(GraphQLErrorKind::Execution, message)
    }

    pub fn kind(&self) -> GraphQLErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `{"errors": {"message": "<KindName>: <message>"}}`
    pub fn to_envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": {
                "message": self.to_string(),
            },
        })
    }
}

impl std::convert::From<ParseError> for GraphQLError {
    fn from(err: ParseError) -> Self {
        let kind =
            if err.kind().is_request_error() {
                GraphQLErrorKind::Request
            } else {
                GraphQLErrorKind::Syntax
            };
        Self::new(kind, err.format_oneline())
    }
}

impl std::convert::From<SchemaBuildError> for GraphQLError {
    fn from(err: SchemaBuildError) -> Self {
        Self::new(GraphQLErrorKind::Schema, err.to_string())
    }
}
