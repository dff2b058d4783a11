/// Categorizes parse errors for programmatic handling.
///
/// The `#[error(...)]` messages are concise/programmatic. Full human-readable
/// messages are in [`ParseError::message()`](crate::ParseError::message).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A control character other than tab, newline or carriage return.
    #[error("illegal character: {codepoint:?}")]
    IllegalCharacter {
        codepoint: char,
    },

    /// A `"` was opened but the document ended before it was closed.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A `{`, `(` or `[` was never closed, or a closing delimiter appeared
    /// without a matching opener.
    #[error("unbalanced delimiter: `{delimiter}`")]
    UnbalancedDelimiter {
        delimiter: String,
    },

    /// Expected specific token(s) but found something else.
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// Two selections in one selection set share the same alias-or-key.
    #[error("duplicated selection: `{key}`")]
    DuplicateSelection {
        key: String,
    },

    #[error("fragment declared without a name")]
    MissingFragmentName,

    #[error("fragment `{fragment_name}` declared without a type condition")]
    MissingTypeCondition {
        fragment_name: String,
    },

    /// A `...Name` spread refers to a fragment the document never declares.
    #[error("unknown fragment: `{fragment_name}`")]
    UnknownFragment {
        fragment_name: String,
    },

    #[error("fragment `{fragment_name}` is declared more than once")]
    DuplicateFragmentDefinition {
        fragment_name: String,
    },

    #[error("operation `{operation_name}` is declared more than once")]
    DuplicateOperationName {
        operation_name: String,
    },

    /// An argument list that is not a sequence of `name: value` pairs.
    #[error("invalid argument list")]
    InvalidArgumentList,

    /// `{ ... }` object literals are not accepted as argument values.
    #[error("object literals are not supported as argument values")]
    UnsupportedObjectLiteral,

    #[error("unsupported operation type: `{operation_type}`")]
    UnsupportedOperationType {
        operation_type: String,
    },

    #[error("invalid variable declaration")]
    InvalidVariableDeclaration,

    #[error("document contains no operations or fragments")]
    EmptyDocument,

    /// Fragment spreads that (transitively) spread themselves.
    #[error("circular fragment spread: {}", cycle.join(" -> "))]
    CircularFragmentSpread {
        cycle: Vec<String>,
    },
}

impl ParseErrorKind {
    /// Whether this error means the document is well-formed but its content
    /// is inconsistent (as opposed to being malformed text).
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::CircularFragmentSpread { .. })
    }
}
