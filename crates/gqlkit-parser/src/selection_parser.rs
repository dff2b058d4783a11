use crate::ParseError;
use crate::ParseErrorKind;
use crate::ast::Arguments;
use crate::ast::DirectiveInvocation;
use crate::ast::Directives;
use crate::ast::FieldSelection;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::RawValue;
use crate::ast::Selection;
use crate::ast::SelectionTree;
use crate::document_parser::FragmentResolver;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token_cursor::TokenCursor;
use crate::token_cursor::unexpected_token;

type Result<T> = std::result::Result<T, ParseError>;

/// Single-pass walk over the token run of one `{ ... }` selection set.
///
/// Fragment spreads are resolved through the shared [`FragmentResolver`] as
/// they are encountered, so a fragment's body is parsed at most once per
/// document no matter how often it is spread.
pub(crate) struct SelectionParser<'r, 'a, 'src> {
    cursor: TokenCursor<'a, 'src>,
    fragments: &'r mut FragmentResolver<'a, 'src>,
}

impl<'r, 'a, 'src> SelectionParser<'r, 'a, 'src> {
    pub fn new(
        tokens: &'a [Token<'src>],
        fragments: &'r mut FragmentResolver<'a, 'src>,
    ) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            fragments,
        }
    }

    /// Parses the complete token run, which must be exactly one balanced
    /// selection set.
    pub fn parse_root(mut self) -> Result<SelectionTree> {
        let tree = self.parse_selection_set()?;
        if let Some(extra) = self.cursor.peek() {
            return Err(unexpected_token(extra, &[]));
        }
        debug_assert!(self.cursor.is_balanced());
        Ok(tree)
    }

    fn parse_selection_set(&mut self) -> Result<SelectionTree> {
        let open = self.cursor.expect(TokenKind::CurlyBraceOpen)?;
        let mut tree = SelectionTree::new();
        loop {
            let Some(token) = self.cursor.peek() else {
                return Err(ParseError::at_token(
                    "Unclosed `{`",
                    ParseErrorKind::UnbalancedDelimiter {
                        delimiter: "{".to_string(),
                    },
                    open,
                ));
            };

            match token.kind {
                TokenKind::CurlyBraceClose => {
                    if tree.is_empty() {
                        return Err(unexpected_token(token, &["a field"]));
                    }
                    self.cursor.consume()?;
                    return Ok(tree);
                },

                TokenKind::Name => {
                    let selection = self.parse_selection()?;
                    if let Err(key) = tree.insert(selection) {
                        return Err(ParseError::at_token(
                            format!("Duplicated property name/alias: {key}"),
                            ParseErrorKind::DuplicateSelection { key },
                            token,
                        ));
                    }
                },

                _ => return Err(unexpected_token(token, &["a field", "`}`"])),
            }
        }
    }

    fn parse_selection(&mut self) -> Result<Selection> {
        let token = self.cursor.consume_expecting(&["a field"])?;

        if let Some(rest) = token.text.strip_prefix("...") {
            return match rest {
                "" | "on" => self.parse_inline_fragment(token),
                fragment_name => self.parse_fragment_spread(token, fragment_name),
            };
        }

        let (alias, key_token) = match self.cursor.peek() {
            Some(colon) if colon.is(TokenKind::Colon) => {
                self.cursor.consume()?;
                let key_token = self.cursor.consume_expecting(&["a field name"])?;
                (Some(expect_name(token)?), key_token)
            },
            _ => (None, token),
        };
        let key = expect_name(key_token)?;

        let arguments = match self.cursor.peek() {
            Some(next) if next.is(TokenKind::ParenOpen) => {
                Some(parse_arguments(&mut self.cursor)?)
            },
            _ => None,
        };

        let directives = parse_directives(&mut self.cursor)?;

        let children = match self.cursor.peek() {
            Some(next) if next.is(TokenKind::CurlyBraceOpen) => {
                Some(self.parse_selection_set()?)
            },
            _ => None,
        };

        Ok(Selection::Field(FieldSelection {
            key,
            alias,
            arguments,
            directives,
            children,
            position: token.position,
        }))
    }

    fn parse_inline_fragment(
        &mut self,
        ellipsis: &'a Token<'src>,
    ) -> Result<Selection> {
        let has_type_condition =
            ellipsis.text == "...on"
            || self.cursor.peek().is_some_and(|next| next.is_name("on"));

        let type_condition = if has_type_condition {
            if ellipsis.text == "..." {
                self.cursor.consume()?;
            }
            let type_token = self.cursor.consume_expecting(&["a type name"])?;
            Some(expect_name(type_token)?)
        } else {
            None
        };

        let directives = parse_directives(&mut self.cursor)?;
        let selection_tree = self.parse_selection_set()?;

        Ok(Selection::InlineFragment(InlineFragment {
            type_condition,
            directives,
            selection_tree,
            position: ellipsis.position,
        }))
    }

    fn parse_fragment_spread(
        &mut self,
        token: &'a Token<'src>,
        fragment_name: &str,
    ) -> Result<Selection> {
        if !is_valid_name(fragment_name) {
            return Err(unexpected_token(token, &["a fragment name"]));
        }
        let directives = parse_directives(&mut self.cursor)?;
        let fragment = self.fragments.resolve(fragment_name, token)?;

        Ok(Selection::FragmentSpread(FragmentSpread {
            fragment,
            directives,
            position: token.position,
        }))
    }
}

/// Reads zero or more `@name(args)` invocations.
pub(crate) fn parse_directives(
    cursor: &mut TokenCursor<'_, '_>,
) -> Result<Option<Directives>> {
    let mut directives = Directives::new();
    while let Some(token) = cursor.peek()
        && token.is(TokenKind::Name)
        && let Some(name) = token.text.strip_prefix('@')
    {
        if !is_valid_name(name) {
            return Err(unexpected_token(token, &["a directive name"]));
        }
        cursor.consume()?;

        let arguments = match cursor.peek() {
            Some(next) if next.is(TokenKind::ParenOpen) => parse_arguments(cursor)?,
            _ => Arguments::new(),
        };
        directives.push(DirectiveInvocation {
            name: name.to_string(),
            arguments,
        });
    }

    Ok(if directives.is_empty() { None } else { Some(directives) })
}

/// Reads a `(name: value ...)` argument list.
pub(crate) fn parse_arguments(
    cursor: &mut TokenCursor<'_, '_>,
) -> Result<Arguments> {
    let open = cursor.expect(TokenKind::ParenOpen)?;
    let mut arguments = Arguments::new();
    loop {
        let token = cursor.consume_expecting(&["an argument name", "`)`"])?;
        match token.kind {
            TokenKind::ParenClose => break,

            TokenKind::Name if is_valid_name(token.text) => {
                match cursor.peek() {
                    Some(colon) if colon.is(TokenKind::Colon) => {
                        cursor.consume()?;
                    },
                    Some(other) => return Err(invalid_argument_list(
                        other,
                        format!("Expected `:` after argument `{}`", token.text),
                    )),
                    None => return Err(cursor.eof_error(&["`:`"])),
                }

                let value = parse_value(cursor)?;
                if arguments.contains_key(token.text) {
                    return Err(invalid_argument_list(
                        token,
                        format!("Argument `{}` is supplied more than once", token.text),
                    ));
                }
                arguments.insert(token.text.to_string(), value);
            },

            _ => return Err(invalid_argument_list(
                token,
                format!("Unexpected `{}` in argument list", token.text),
            )),
        }
    }

    if arguments.is_empty() {
        return Err(invalid_argument_list(open, "Argument list must not be empty"));
    }
    Ok(arguments)
}

/// Reads one argument value: a string, a bare literal, a `$variable` or a
/// `[ ... ]` list of values.
pub(crate) fn parse_value(cursor: &mut TokenCursor<'_, '_>) -> Result<RawValue> {
    let token = cursor.consume_expecting(&["a value"])?;
    match token.kind {
        TokenKind::StringLiteral => Ok(RawValue::String(token.text.to_string())),

        TokenKind::SquareBracketOpen => {
            let mut items = vec![];
            loop {
                match cursor.peek() {
                    Some(close) if close.is(TokenKind::SquareBracketClose) => {
                        cursor.consume()?;
                        return Ok(RawValue::List(items));
                    },
                    Some(_) => items.push(parse_value(cursor)?),
                    None => return Err(cursor.eof_error(&["`]`"])),
                }
            }
        },

        TokenKind::CurlyBraceOpen => Err(ParseError::at_token(
            "Object literals are not supported as argument values",
            ParseErrorKind::UnsupportedObjectLiteral,
            token,
        )),

        TokenKind::Name => match token.text.strip_prefix('$') {
            Some(variable) if is_valid_name(variable) => {
                Ok(RawValue::Variable(variable.to_string()))
            },
            Some(_) => Err(unexpected_token(token, &["a variable name"])),
            None => Ok(RawValue::Literal(token.text.to_string())),
        },

        _ => Err(invalid_argument_list(
            token,
            format!("Unexpected `{}` where a value was expected", token.text),
        )),
    }
}

fn invalid_argument_list(token: &Token<'_>, message: impl Into<String>) -> ParseError {
    ParseError::at_token(message, ParseErrorKind::InvalidArgumentList, token)
}

/// Returns the token's text if it is a valid name.
pub(crate) fn expect_name(token: &Token<'_>) -> Result<String> {
    if token.is(TokenKind::Name) && is_valid_name(token.text) {
        Ok(token.text.to_string())
    } else {
        Err(unexpected_token(token, &["a name"]))
    }
}

/// `/[_A-Za-z][_0-9A-Za-z]*/`
pub(crate) fn is_valid_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
        },
        _ => false,
    }
}
