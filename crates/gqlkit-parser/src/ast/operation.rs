use crate::SourcePosition;
use crate::ast::RawValue;
use crate::ast::SelectionTree;
use crate::ast::TypeSyntax;

/// Which root an operation runs against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum OperationKind {
    Mutation,
    Query,
}

impl OperationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
        }
    }
}

/// A `$name: Type = default` declaration in an operation header.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VariableDecl {
    /// The variable name without its leading `$`.
    pub name: String,
    pub type_syntax: TypeSyntax,
    pub default_value: Option<RawValue>,
    pub position: SourcePosition,
}

/// One query or mutation of a [`Document`](crate::ast::Document).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Operation {
    pub name: Option<String>,

    /// `None` when the document omits the `query`/`mutation` keyword; the
    /// root is then inferred from the selected fields.
    pub kind: Option<OperationKind>,

    pub variables: Vec<VariableDecl>,
    pub selection_tree: SelectionTree,
    pub position: SourcePosition,
}

impl Operation {
    pub fn variable(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.iter().find(|var| var.name == name)
    }
}
