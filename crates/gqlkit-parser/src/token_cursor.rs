use crate::ParseError;
use crate::ParseErrorKind;
use crate::token::Token;
use crate::token::TokenKind;

type Result<T> = std::result::Result<T, ParseError>;

/// Cursor over a slice of [`Token`]s with arbitrary lookahead and running
/// nesting depths.
///
/// Consuming a `{`/`(`/`[` increments the matching depth counter and
/// consuming its closer decrements it; a closer consumed at depth zero is an
/// [`ParseErrorKind::UnbalancedDelimiter`] error.
pub(crate) struct TokenCursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    index: usize,
    curly_depth: usize,
    paren_depth: usize,
    square_depth: usize,
}

impl<'a, 'src> TokenCursor<'a, 'src> {
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        Self {
            tokens,
            index: 0,
            curly_depth: 0,
            paren_depth: 0,
            square_depth: 0,
        }
    }

    /// Advance to the next token and return it.
    ///
    /// Returns `Ok(None)` if the cursor is exhausted.
    pub fn consume(&mut self) -> Result<Option<&'a Token<'src>>> {
        let tokens: &'a [Token<'src>] = self.tokens;
        let Some(token) = tokens.get(self.index) else {
            return Ok(None);
        };
        self.index += 1;

        let (depth, opens) = match token.kind {
            TokenKind::CurlyBraceOpen => (&mut self.curly_depth, true),
            TokenKind::CurlyBraceClose => (&mut self.curly_depth, false),
            TokenKind::ParenOpen => (&mut self.paren_depth, true),
            TokenKind::ParenClose => (&mut self.paren_depth, false),
            TokenKind::SquareBracketOpen => (&mut self.square_depth, true),
            TokenKind::SquareBracketClose => (&mut self.square_depth, false),
            _ => return Ok(Some(token)),
        };

        if opens {
            *depth += 1;
        } else if *depth == 0 {
            return Err(ParseError::at_token(
                format!("Unbalanced `{}`", token.text),
                ParseErrorKind::UnbalancedDelimiter {
                    delimiter: token.text.to_string(),
                },
                token,
            ));
        } else {
            *depth -= 1;
        }
        Ok(Some(token))
    }

    /// Consume the next token, failing if there is none.
    pub fn consume_expecting(
        &mut self,
        expected: &[&str],
    ) -> Result<&'a Token<'src>> {
        match self.consume()? {
            Some(token) => Ok(token),
            None => Err(self.eof_error(expected)),
        }
    }

    /// Consume the next token, failing unless it is of `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token<'src>> {
        match self.peek() {
            Some(token) if token.is(kind) => self.consume_expecting(&[]),
            Some(token) => Err(unexpected_token(token, &[kind.describe()])),
            None => Err(self.eof_error(&[kind.describe()])),
        }
    }

    pub fn eof_error(&self, expected: &[&str]) -> ParseError {
        let message = if expected.is_empty() {
            "Unexpected end of document".to_string()
        } else {
            format!(
                "Unexpected end of document, expected {}",
                expected.join(" or "),
            )
        };
        let kind = ParseErrorKind::UnexpectedEof {
            expected: expected.iter().map(|s| s.to_string()).collect(),
        };
        match self.tokens.last() {
            Some(last) => ParseError::at_token(message, kind, last),
            None => ParseError::new(message, kind, None),
        }
    }

    /// `true` when every `{`, `(` and `[` consumed so far has been closed.
    pub fn is_balanced(&self) -> bool {
        self.curly_depth == 0 && self.paren_depth == 0 && self.square_depth == 0
    }

    pub fn curly_depth(&self) -> usize {
        self.curly_depth
    }

    /// Peek at the next token without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&'a Token<'src>> {
        self.peek_nth(0)
    }

    /// Peek at the nth token ahead (0-indexed from next unconsumed token).
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token<'src>> {
        let tokens: &'a [Token<'src>] = self.tokens;
        tokens.get(self.index + n)
    }

    /// Index of the next unconsumed token within the underlying slice.
    pub fn position(&self) -> usize {
        self.index
    }
}

pub(crate) fn unexpected_token(
    token: &Token<'_>,
    expected: &[&str],
) -> ParseError {
    let message = if expected.is_empty() {
        format!("Unexpected token `{}`", token.text)
    } else {
        format!(
            "Unexpected token `{}`, expected {}",
            token.text,
            expected.join(" or "),
        )
    };
    ParseError::at_token(
        message,
        ParseErrorKind::UnexpectedToken {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: token.text.to_string(),
        },
        token,
    )
}
