/// The kind of a [`Token`](crate::token::Token).
///
/// Only punctuators get their own kind. Everything else the lexer emits is
/// either a string literal or a maximal run of non-delimiter characters
/// (`Name`), which covers names, numbers, `$variable` references,
/// `@directive` names and `...Fragment` spreads alike. Telling those apart is
/// left to the parser.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum TokenKind {
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    /// Any other maximal run of non-delimiter characters.
    Name,

    /// A double-quoted run, quotes included.
    StringLiteral,
}

impl TokenKind {
    /// Maps a punctuator character to its kind.
    pub(crate) fn punctuator(ch: char) -> Option<Self> {
        Some(match ch {
            ':' => Self::Colon,
            '}' => Self::CurlyBraceClose,
            '{' => Self::CurlyBraceOpen,
            ')' => Self::ParenClose,
            '(' => Self::ParenOpen,
            ']' => Self::SquareBracketClose,
            '[' => Self::SquareBracketOpen,
            _ => return None,
        })
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Colon => "`:`",
            Self::CurlyBraceClose => "`}`",
            Self::CurlyBraceOpen => "`{`",
            Self::ParenClose => "`)`",
            Self::ParenOpen => "`(`",
            Self::SquareBracketClose => "`]`",
            Self::SquareBracketOpen => "`[`",
            Self::Name => "a name",
            Self::StringLiteral => "a string literal",
        }
    }
}
