use crate::SourcePosition;
use crate::ast::Directives;
use crate::ast::SelectionTree;
use std::sync::Arc;

/// A `fragment Name on Type { ... }` declaration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Option<Directives>,
    pub selection_tree: SelectionTree,
    pub position: SourcePosition,
}

/// A `...Name` spread of an external fragment.
///
/// Spreads share the parsed [`FragmentDefinition`]: every spread of the same
/// fragment within one document points at the same `Arc`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FragmentSpread {
    pub fragment: Arc<FragmentDefinition>,
    pub directives: Option<Directives>,
    pub position: SourcePosition,
}

impl FragmentSpread {
    pub fn name(&self) -> &str {
        self.fragment.name.as_str()
    }

    pub fn type_condition(&self) -> &str {
        self.fragment.type_condition.as_str()
    }

    pub fn selection_tree(&self) -> &SelectionTree {
        &self.fragment.selection_tree
    }
}

/// A `... on Type @directive { ... }` inline fragment. Both the type
/// condition and the directives are optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Option<Directives>,
    pub selection_tree: SelectionTree,
    pub position: SourcePosition,
}
