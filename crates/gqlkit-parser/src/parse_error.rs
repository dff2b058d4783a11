use crate::ParseErrorKind;
use crate::SourcePosition;
use crate::token::Token;

/// A parse error with an optional position hint.
///
/// Parsing aborts at the first error, so a failed parse yields exactly one
/// [`ParseError`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct ParseError {
    /// Human-readable primary error message.
    message: String,

    /// Categorized error kind for programmatic handling.
    kind: ParseErrorKind,

    /// Where the error was detected, if it can be pinned to a location.
    position: Option<SourcePosition>,

    /// Index of the offending token within the token stream, if the error
    /// was raised after tokenizing.
    token_index: Option<usize>,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        kind: ParseErrorKind,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            position,
            token_index: None,
        }
    }

    /// Creates an error pointing at `token`.
    pub fn at_token(
        message: impl Into<String>,
        kind: ParseErrorKind,
        token: &Token<'_>,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            position: Some(token.position),
            token_index: Some(token.index),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }

    pub fn token_index(&self) -> Option<usize> {
        self.token_index
    }

    /// Formats as `message (at line:col, token #n)`.
    pub fn format_oneline(&self) -> String {
        match (&self.position, self.token_index) {
            (Some(pos), Some(index)) => {
                format!("{} (at {pos}, token #{index})", self.message)
            },
            (Some(pos), None) => format!("{} (at {pos})", self.message),
            (None, _) => self.message.clone(),
        }
    }
}
