//! Lexes a query document `&str` into a flat list of [`Token`]s.
//!
//! Token text borrows directly from the source string. Whitespace, commas and
//! `#` line comments are insignificant separators and never produce tokens; a
//! single leading byte-order mark is dropped.

use crate::ParseError;
use crate::ParseErrorKind;
use crate::SourcePosition;
use crate::token::Token;
use crate::token::TokenKind;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

type Result<T> = std::result::Result<T, ParseError>;

/// Tokenizes `source`, failing on the first illegal character or
/// unterminated string literal.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    Lexer::new(source).run()
}

/// Returns `source` without its leading byte-order mark and without any `#`
/// line comments. `#` characters inside string literals are kept.
///
/// Tokenizing the returned text yields the same lexemes as tokenizing
/// `source` itself.
pub fn strip_ignored(source: &str) -> String {
    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if in_string {
            output.push(ch);
            match ch {
                '\\' => if let Some(escaped) = chars.next() {
                    output.push(escaped);
                },
                '"' => in_string = false,
                _ => (),
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                output.push(ch);
            },
            '#' => {
                while chars.next_if(|c| *c != '\n' && *c != '\r').is_some() {}
            },
            _ => output.push(ch),
        }
    }
    output
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | ',' | '#' | '"')
        || TokenKind::punctuator(ch).is_some()
}

struct Lexer<'src> {
    source: &'src str,

    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    curr_line: usize,
    curr_col: usize,

    /// Used to treat `\r\n` as a single newline.
    last_char_was_cr: bool,

    tokens: Vec<Token<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        let curr_byte_offset =
            if source.starts_with(BYTE_ORDER_MARK) {
                BYTE_ORDER_MARK.len_utf8()
            } else {
                0
            };

        Self {
            source,
            curr_byte_offset,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
            tokens: vec![],
        }
    }

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col,
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes the next character and updates position tracking.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn check_legal(&self, ch: char) -> Result<()> {
        if ch < '\u{0020}' && !matches!(ch, '\t' | '\n' | '\r') {
            return Err(ParseError::new(
                format!("Illegal character: {:?}", ch),
                ParseErrorKind::IllegalCharacter { codepoint: ch },
                Some(self.curr_position()),
            ));
        }
        Ok(())
    }

    fn push_token(
        &mut self,
        kind: TokenKind,
        start: SourcePosition,
    ) {
        let text = &self.source[start.byte_offset()..self.curr_byte_offset];
        let index = self.tokens.len();
        self.tokens.push(Token {
            kind,
            text,
            position: start,
            index,
        });
    }

    fn run(mut self) -> Result<Vec<Token<'src>>> {
        while let Some(ch) = self.peek_char() {
            self.check_legal(ch)?;
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' => {
                    self.consume();
                },

                '#' => self.skip_comment()?,

                '"' => self.lex_string()?,

                _ => match TokenKind::punctuator(ch) {
                    Some(kind) => {
                        let start = self.curr_position();
                        self.consume();
                        self.push_token(kind, start);
                    },
                    None => self.lex_name()?,
                },
            }
        }
        Ok(self.tokens)
    }

    fn skip_comment(&mut self) -> Result<()> {
        let rest = self.remaining();
        let comment_len =
            memchr::memchr2(b'\n', b'\r', rest.as_bytes())
                .unwrap_or(rest.len());

        for ch in rest[..comment_len].chars() {
            self.check_legal(ch)?;
            self.consume();
        }
        Ok(())
    }

    fn lex_string(&mut self) -> Result<()> {
        let start = self.curr_position();
        self.consume();

        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => return Err(ParseError::new(
                    "Unterminated string literal",
                    ParseErrorKind::UnterminatedString,
                    Some(start),
                )),

                Some('\\') => {
                    self.consume();
                    if let Some(escaped) = self.peek_char() {
                        self.check_legal(escaped)?;
                        if escaped != '\n' && escaped != '\r' {
                            self.consume();
                        }
                    }
                },

                Some('"') => {
                    self.consume();
                    break;
                },

                Some(ch) => {
                    self.check_legal(ch)?;
                    self.consume();
                },
            }
        }

        self.push_token(TokenKind::StringLiteral, start);
        Ok(())
    }

    fn lex_name(&mut self) -> Result<()> {
        let start = self.curr_position();
        while let Some(ch) = self.peek_char() {
            if is_delimiter(ch) {
                break;
            }
            self.check_legal(ch)?;
            self.consume();
        }
        self.push_token(TokenKind::Name, start);
        Ok(())
    }
}
