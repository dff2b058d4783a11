//! The parsed, schema-independent shape of a query document.

mod directive_invocation;
mod document;
mod fragment;
mod operation;
mod raw_value;
mod selection;
mod selection_tree;
mod type_syntax;

pub use directive_invocation::DirectiveInvocation;
pub use directive_invocation::Directives;
pub use document::Document;
pub use fragment::FragmentDefinition;
pub use fragment::FragmentSpread;
pub use fragment::InlineFragment;
pub use operation::Operation;
pub use operation::OperationKind;
pub use operation::VariableDecl;
pub use raw_value::Arguments;
pub use raw_value::RawValue;
pub use selection::FieldSelection;
pub use selection::Selection;
pub use selection_tree::SelectionTree;
pub use type_syntax::TypeSyntax;
