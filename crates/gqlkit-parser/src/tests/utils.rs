//! Various test utils.

use crate::ParseError;
use crate::ParseErrorKind;
use crate::ast::FieldSelection;
use crate::ast::Selection;
use crate::ast::SelectionTree;
use crate::parse_document;
use crate::tokenize;

/// Tokenizes `source` and returns the text of every token.
pub fn token_texts(source: &str) -> Vec<String> {
    tokenize(source)
        .expect("source tokenizes")
        .into_iter()
        .map(|token| token.text.to_string())
        .collect()
}

/// Parses `source` and returns the selection tree of its only operation.
pub fn only_selection_tree(source: &str) -> SelectionTree {
    let document = parse_document(source).expect("document parses");
    assert_eq!(document.operations().len(), 1);
    document.operations()[0].selection_tree.clone()
}

/// Returns the field selection at `idx`, panicking on fragments.
pub fn field_at(tree: &SelectionTree, idx: usize) -> &FieldSelection {
    match tree.iter().nth(idx) {
        Some(Selection::Field(field)) => field,
        other => panic!("expected a field at index {idx}, found {other:?}"),
    }
}

pub fn parse_error_kind(source: &str) -> ParseErrorKind {
    parse_error(source).kind().clone()
}

pub fn parse_error(source: &str) -> ParseError {
    match parse_document(source) {
        Ok(document) => panic!("expected a parse error, got {document:#?}"),
        Err(err) => err,
    }
}
