use crate::SourcePosition;
use crate::token::TokenKind;

/// A lexical token borrowed from the source text.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,

    /// The exact source text of this token (string literals keep their
    /// quotes).
    pub text: &'src str,

    /// Position of the first character of this token.
    pub position: SourcePosition,

    /// 0-based index of this token within the token stream.
    pub index: usize,
}

impl<'src> Token<'src> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is a `Name` token spelled exactly `text`.
    pub fn is_name(&self, text: &str) -> bool {
        self.kind == TokenKind::Name && self.text == text
    }

    /// Compares kind and text only, ignoring where the token came from.
    pub fn same_lexeme(&self, other: &Token<'_>) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}
