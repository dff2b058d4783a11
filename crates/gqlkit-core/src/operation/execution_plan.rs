use crate::operation::ExecutionNode;
use crate::types::TypeId;
use crate::types::TypeRef;
use gqlkit_parser::ast::OperationKind;
use gqlkit_parser::ast::RawValue;

/// An operation variable with its declared type resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundVariable {
    pub name: String,
    pub type_ref: TypeRef,
    pub default_value: Option<RawValue>,
}

/// One operation bound to a schema, ready to execute with any set of
/// variables.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionPlan {
    pub(crate) operation_kind: OperationKind,
    pub(crate) root_type: TypeId,
    pub(crate) variables: Vec<BoundVariable>,
    pub(crate) nodes: Vec<ExecutionNode>,
}

impl ExecutionPlan {
    /// The kind of root the operation runs against, explicit or inferred.
    pub fn operation_kind(&self) -> OperationKind {
        self.operation_kind
    }

    pub fn root_type(&self) -> TypeId {
        self.root_type
    }

    pub fn variables(&self) -> &[BoundVariable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&BoundVariable> {
        self.variables.iter().find(|var| var.name == name)
    }

    /// Top-level nodes in selection order. Each runs as its own task.
    pub fn nodes(&self) -> &[ExecutionNode] {
        &self.nodes
    }
}
