//! Lexer and recursive-descent parser for gqlkit query documents.
//!
//! A query document is first turned into a flat list of
//! [`Token`](token::Token)s by [`tokenize()`], then split into fragment and
//! operation declarations and finally parsed into one
//! [`SelectionTree`](ast::SelectionTree) per operation by
//! [`parse_document()`]. This crate knows nothing about schemas; binding a
//! parsed [`Operation`](ast::Operation) to a schema happens in `gqlkit-core`.

pub mod ast;
mod document_parser;
mod lexer;
mod parse_error;
mod parse_error_kind;
mod selection_parser;
mod source_position;
pub mod token;
mod token_cursor;

pub use document_parser::parse_document;
pub use lexer::strip_ignored;
pub use lexer::tokenize;
pub use parse_error::ParseError;
pub use parse_error_kind::ParseErrorKind;
pub use source_position::SourcePosition;

#[cfg(test)]
mod tests;
