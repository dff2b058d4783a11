pub use gqlkit_core::*;

/// The lexer and document parser: [`parse_document`](parser::parse_document)
/// and the document [`ast`](parser::ast).
pub mod parser {
    pub use gqlkit_parser::*;
}
