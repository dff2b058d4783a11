//! This module provides the token types produced by the lexer and consumed by
//! the parser.

#[allow(clippy::module_inception)]
mod token;
mod token_kind;

pub use token::Token;
pub use token_kind::TokenKind;
