use crate::ParseError;
use crate::ParseErrorKind;
use crate::SourcePosition;
use crate::ast::Directives;
use crate::ast::Document;
use crate::ast::FragmentDefinition;
use crate::ast::Operation;
use crate::ast::OperationKind;
use crate::ast::RawValue;
use crate::ast::TypeSyntax;
use crate::ast::VariableDecl;
use crate::lexer::tokenize;
use crate::selection_parser::SelectionParser;
use crate::selection_parser::expect_name;
use crate::selection_parser::is_valid_name;
use crate::selection_parser::parse_directives;
use crate::selection_parser::parse_value;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token_cursor::TokenCursor;
use crate::token_cursor::unexpected_token;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ParseError>;

/// Parses a complete query document.
///
/// Parsing happens in two passes. The first splits the token stream into
/// fragment and operation declarations, locating each declaration's
/// selection set by bracket-depth counting. The second parses the selection
/// set of every operation (and then of every fragment not reached from an
/// operation), resolving fragment spreads on demand.
pub fn parse_document(source: &str) -> Result<Document> {
    let tokens = tokenize(source)?;
    DocumentParser::new(&tokens).parse()
}

struct FragmentDeclaration<'a, 'src> {
    name_token: &'a Token<'src>,
    type_condition: String,
    directives: Option<Directives>,
    body: Range<usize>,
    position: SourcePosition,
}

struct OperationDeclaration {
    name: Option<String>,
    kind: Option<OperationKind>,
    variables: Vec<VariableDecl>,
    body: Range<usize>,
    position: SourcePosition,
}

/// Lazily parses fragment bodies, memoizing each by name.
///
/// A stack of fragments currently being parsed turns circular spreads into
/// an error instead of unbounded recursion.
pub(crate) struct FragmentResolver<'a, 'src> {
    tokens: &'a [Token<'src>],
    declarations: IndexMap<String, FragmentDeclaration<'a, 'src>>,
    resolved: HashMap<String, Arc<FragmentDefinition>>,
    visiting: Vec<String>,
}

impl<'a, 'src> FragmentResolver<'a, 'src> {
    pub fn resolve(
        &mut self,
        name: &str,
        spread_token: &Token<'_>,
    ) -> Result<Arc<FragmentDefinition>> {
        if let Some(fragment) = self.resolved.get(name) {
            return Ok(fragment.clone());
        }

        if let Some(cycle_start) = self.visiting.iter().position(|n| n == name) {
            let mut cycle = self.visiting[cycle_start..].to_vec();
            cycle.push(name.to_string());
            return Err(ParseError::at_token(
                format!(
                    "Fragment spread circular dependency detected: {}",
                    cycle.join(" -> "),
                ),
                ParseErrorKind::CircularFragmentSpread { cycle },
                spread_token,
            ));
        }

        let Some(declaration) = self.declarations.get(name) else {
            return Err(ParseError::at_token(
                format!("Fragment {name} not found"),
                ParseErrorKind::UnknownFragment {
                    fragment_name: name.to_string(),
                },
                spread_token,
            ));
        };
        let body = declaration.body.clone();
        let type_condition = declaration.type_condition.clone();
        let directives = declaration.directives.clone();
        let position = declaration.position;

        let tokens: &'a [Token<'src>] = self.tokens;
        self.visiting.push(name.to_string());
        let selection_tree = SelectionParser::new(&tokens[body], self).parse_root();
        self.visiting.pop();

        let fragment = Arc::new(FragmentDefinition {
            name: name.to_string(),
            type_condition,
            directives,
            selection_tree: selection_tree?,
            position,
        });
        self.resolved.insert(name.to_string(), fragment.clone());
        Ok(fragment)
    }
}

struct DocumentParser<'a, 'src> {
    tokens: &'a [Token<'src>],
    fragments: IndexMap<String, FragmentDeclaration<'a, 'src>>,
    operations: Vec<OperationDeclaration>,
}

impl<'a, 'src> DocumentParser<'a, 'src> {
    fn new(tokens: &'a [Token<'src>]) -> Self {
        Self {
            tokens,
            fragments: IndexMap::new(),
            operations: vec![],
        }
    }

    fn parse(mut self) -> Result<Document> {
        self.split_declarations()?;

        if self.fragments.is_empty() && self.operations.is_empty() {
            return Err(ParseError::new(
                "Document contains no operations or fragments",
                ParseErrorKind::EmptyDocument,
                None,
            ));
        }

        let tokens = self.tokens;
        let mut resolver = FragmentResolver {
            tokens,
            declarations: self.fragments,
            resolved: HashMap::new(),
            visiting: vec![],
        };

        let mut operations = Vec::with_capacity(self.operations.len());
        for declaration in self.operations {
            let selection_tree =
                SelectionParser::new(&tokens[declaration.body], &mut resolver)
                    .parse_root()?;
            operations.push(Operation {
                name: declaration.name,
                kind: declaration.kind,
                variables: declaration.variables,
                selection_tree,
                position: declaration.position,
            });
        }

        // Fragments nobody spreads still have to be well-formed.
        let declared: Vec<(String, &'a Token<'src>)> =
            resolver.declarations
                .iter()
                .map(|(name, decl)| (name.clone(), decl.name_token))
                .collect();
        let mut fragments = IndexMap::with_capacity(declared.len());
        for (name, name_token) in declared {
            let fragment = resolver.resolve(&name, name_token)?;
            fragments.insert(name, fragment);
        }

        Ok(Document {
            fragments,
            operations,
        })
    }

    fn split_declarations(&mut self) -> Result<()> {
        let mut cursor = TokenCursor::new(self.tokens);
        while let Some(token) = cursor.peek() {
            match token.kind {
                TokenKind::CurlyBraceOpen => {
                    let body = scan_selection_set(&mut cursor)?;
                    self.operations.push(OperationDeclaration {
                        name: None,
                        kind: None,
                        variables: vec![],
                        body,
                        position: token.position,
                    });
                },

                TokenKind::Name if token.text == "fragment" => {
                    self.declare_fragment(&mut cursor)?
                },

                TokenKind::Name if token.text == "query" || token.text == "mutation" => {
                    self.declare_operation(&mut cursor)?
                },

                TokenKind::Name if token.text == "subscription" => {
                    return Err(ParseError::at_token(
                        "Subscriptions are not supported",
                        ParseErrorKind::UnsupportedOperationType {
                            operation_type: token.text.to_string(),
                        },
                        token,
                    ));
                },

                _ => return Err(unexpected_token(
                    token,
                    &["`{`", "`query`", "`mutation`", "`fragment`"],
                )),
            }
        }
        Ok(())
    }

    fn declare_fragment(&mut self, cursor: &mut TokenCursor<'a, 'src>) -> Result<()> {
        let keyword = cursor.consume_expecting(&["`fragment`"])?;

        let name_token = match cursor.peek() {
            Some(token)
                if token.is(TokenKind::Name)
                    && !token.is_name("on")
                    && is_valid_name(token.text) => {
                cursor.consume()?;
                token
            },
            _ => return Err(ParseError::at_token(
                "Fragment declaration requires a name",
                ParseErrorKind::MissingFragmentName,
                keyword,
            )),
        };
        let name = name_token.text.to_string();

        let missing_type_condition = || ParseError::at_token(
            format!("Fragment {} requires a type condition", name_token.text),
            ParseErrorKind::MissingTypeCondition {
                fragment_name: name_token.text.to_string(),
            },
            name_token,
        );
        match cursor.peek() {
            Some(on) if on.is_name("on") => {
                cursor.consume()?;
            },
            _ => return Err(missing_type_condition()),
        }
        let type_condition = match cursor.peek() {
            Some(token) if token.is(TokenKind::Name) && is_valid_name(token.text) => {
                cursor.consume()?;
                token.text.to_string()
            },
            _ => return Err(missing_type_condition()),
        };

        let directives = parse_directives(cursor)?;
        let body = scan_selection_set(cursor)?;

        if self.fragments.contains_key(&name) {
            return Err(ParseError::at_token(
                format!("Fragment {name} is declared more than once"),
                ParseErrorKind::DuplicateFragmentDefinition {
                    fragment_name: name,
                },
                name_token,
            ));
        }
        self.fragments.insert(name, FragmentDeclaration {
            name_token,
            type_condition,
            directives,
            body,
            position: keyword.position,
        });
        Ok(())
    }

    fn declare_operation(&mut self, cursor: &mut TokenCursor<'a, 'src>) -> Result<()> {
        let keyword = cursor.consume_expecting(&["`query`", "`mutation`"])?;
        let kind = if keyword.text == "mutation" {
            OperationKind::Mutation
        } else {
            OperationKind::Query
        };

        let name = match cursor.peek() {
            Some(token) if token.is(TokenKind::Name) => {
                cursor.consume()?;
                Some(expect_name(token)?)
            },
            _ => None,
        };

        let variables = match cursor.peek() {
            Some(token) if token.is(TokenKind::ParenOpen) => {
                parse_variable_declarations(cursor)?
            },
            _ => vec![],
        };

        let body = scan_selection_set(cursor)?;

        if let Some(name) = &name
            && self.operations.iter().any(|op| op.name.as_ref() == Some(name))
        {
            return Err(ParseError::at_token(
                format!("Operation {name} is declared more than once"),
                ParseErrorKind::DuplicateOperationName {
                    operation_name: name.clone(),
                },
                keyword,
            ));
        }
        self.operations.push(OperationDeclaration {
            name,
            kind: Some(kind),
            variables,
            body,
            position: keyword.position,
        });
        Ok(())
    }
}

/// Consumes a `{ ... }` run and returns its token range (braces included),
/// matching the closing brace by depth counting.
fn scan_selection_set(cursor: &mut TokenCursor<'_, '_>) -> Result<Range<usize>> {
    let start = cursor.position();
    let open = cursor.expect(TokenKind::CurlyBraceOpen)?;
    loop {
        let Some(token) = cursor.consume()? else {
            return Err(ParseError::at_token(
                "Unclosed `{`",
                ParseErrorKind::UnbalancedDelimiter {
                    delimiter: "{".to_string(),
                },
                open,
            ));
        };

        if token.is(TokenKind::CurlyBraceClose) && cursor.curly_depth() == 0 {
            if !cursor.is_balanced() {
                return Err(ParseError::at_token(
                    "Unclosed `(` or `[` inside selection set",
                    ParseErrorKind::UnbalancedDelimiter {
                        delimiter: "(".to_string(),
                    },
                    token,
                ));
            }
            return Ok(start..cursor.position());
        }
    }
}

/// Reads `($name: Type = default ...)`.
fn parse_variable_declarations(
    cursor: &mut TokenCursor<'_, '_>,
) -> Result<Vec<VariableDecl>> {
    let open = cursor.expect(TokenKind::ParenOpen)?;
    let mut variables: Vec<VariableDecl> = vec![];
    loop {
        let token = cursor.consume_expecting(&["a variable", "`)`"])?;
        if token.is(TokenKind::ParenClose) {
            break;
        }

        let name = match token.text.strip_prefix('$') {
            Some(name) if token.is(TokenKind::Name) && is_valid_name(name) => name,
            _ => return Err(invalid_variable_declaration(
                token,
                format!("Expected a `$variable`, found `{}`", token.text),
            )),
        };

        match cursor.peek() {
            Some(colon) if colon.is(TokenKind::Colon) => {
                cursor.consume()?;
            },
            Some(other) => return Err(invalid_variable_declaration(
                other,
                format!("Expected `:` after variable `${name}`"),
            )),
            None => return Err(cursor.eof_error(&["`:`"])),
        }

        let (type_syntax, leftover) = parse_type_syntax(cursor)?;
        let default_value = match leftover {
            Some("=") => Some(parse_value(cursor)?),
            Some(text) => match text.strip_prefix('=') {
                Some(literal) => Some(RawValue::Literal(literal.to_string())),
                None => return Err(invalid_variable_declaration(
                    token,
                    format!("Unexpected `{text}` after type of `${name}`"),
                )),
            },
            None => match cursor.peek() {
                Some(eq) if eq.is_name("=") => {
                    cursor.consume()?;
                    Some(parse_value(cursor)?)
                },
                Some(eq) if eq.is(TokenKind::Name) && eq.text.starts_with('=') => {
                    cursor.consume()?;
                    Some(RawValue::Literal(eq.text[1..].to_string()))
                },
                _ => None,
            },
        };

        if variables.iter().any(|var| var.name == name) {
            return Err(invalid_variable_declaration(
                token,
                format!("Variable `${name}` is declared more than once"),
            ));
        }
        variables.push(VariableDecl {
            name: name.to_string(),
            type_syntax,
            default_value,
            position: token.position,
        });
    }

    if variables.is_empty() {
        return Err(invalid_variable_declaration(
            open,
            "Variable list must not be empty",
        ));
    }
    Ok(variables)
}

/// Reads a type such as `Int`, `Int!` or `[Int!]!`.
///
/// Because `!` and `=` are not delimiters, `Int!=5` lexes as a single token.
/// Whatever trails the type inside its last token (e.g. `=5`) is returned
/// for the caller to interpret.
fn parse_type_syntax<'a, 'src>(
    cursor: &mut TokenCursor<'a, 'src>,
) -> Result<(TypeSyntax, Option<&'src str>)> {
    let token = cursor.consume_expecting(&["a type"])?;
    match token.kind {
        TokenKind::SquareBracketOpen => {
            let (inner, leftover) = parse_type_syntax(cursor)?;
            if leftover.is_some() {
                return Err(invalid_variable_declaration(token, "Malformed list type"));
            }
            cursor.expect(TokenKind::SquareBracketClose)?;
            let list = TypeSyntax::List {
                of: Box::new(inner),
                nullable: true,
            };

            match cursor.peek() {
                Some(bang) if bang.is(TokenKind::Name) && bang.text.starts_with('!') => {
                    cursor.consume()?;
                    let rest = &bang.text[1..];
                    Ok((list.into_non_null(), (!rest.is_empty()).then_some(rest)))
                },
                _ => Ok((list, None)),
            }
        },

        TokenKind::Name => {
            let (type_text, leftover) = match token.text.find('=') {
                Some(idx) => (&token.text[..idx], Some(&token.text[idx..])),
                None => (token.text, None),
            };
            let (name, nullable) = match type_text.strip_suffix('!') {
                Some(name) => (name, false),
                None => (type_text, true),
            };
            if !is_valid_name(name) {
                return Err(invalid_variable_declaration(
                    token,
                    format!("Invalid type `{type_text}`"),
                ));
            }
            Ok((
                TypeSyntax::Named {
                    name: name.to_string(),
                    nullable,
                },
                leftover,
            ))
        },

        _ => Err(invalid_variable_declaration(
            token,
            format!("Expected a type, found `{}`", token.text),
        )),
    }
}

fn invalid_variable_declaration(
    token: &Token<'_>,
    message: impl Into<String>,
) -> ParseError {
    ParseError::at_token(message, ParseErrorKind::InvalidVariableDeclaration, token)
}
