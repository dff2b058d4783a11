use crate::types::TypeId;
use gqlkit_parser::ast::Arguments;
use indexmap::IndexMap;

/// A directive invocation resolved against the schema's directive table.
///
/// Arguments stay unevaluated until execution, since they commonly
/// reference variables.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundDirective {
    pub name: String,
    pub arguments: Arguments,
}

/// The bound selections below a field.
#[derive(Clone, Debug, PartialEq)]
pub enum Children {
    /// The field returns a scalar or enum.
    Leaf,

    /// The field returns an object or interface.
    Fields(Vec<ExecutionNode>),

    /// The field returns a union: one branch per member type any selection
    /// applies to.
    Union(IndexMap<TypeId, Vec<ExecutionNode>>),
}

impl Children {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

/// A field selection bound to a schema field.
///
/// Fragments are flattened away while binding: their fields become nodes of
/// the enclosing selection, each remembering the fragment's type condition
/// and directives.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionNode {
    /// Alias-or-name under which the result is rendered.
    pub response_key: String,
    pub field_name: String,

    /// The type the field was bound against.
    pub parent_type: TypeId,

    /// The type conditions of the enclosing fragments that narrow the
    /// selection. The node only applies to runtime values whose concrete
    /// type satisfies all of them.
    pub type_conditions: Vec<TypeId>,

    pub arguments: Arguments,
    pub directives: Vec<BoundDirective>,
    pub children: Children,
}
