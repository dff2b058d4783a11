use crate::ast::FragmentDefinition;
use crate::ast::Operation;
use indexmap::IndexMap;
use std::sync::Arc;

/// A fully parsed query document: the declared fragments (keyed by name, in
/// declaration order) and the operations in source order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Document {
    pub(crate) fragments: IndexMap<String, Arc<FragmentDefinition>>,
    pub(crate) operations: Vec<Operation>,
}

impl Document {
    pub fn fragments(&self) -> &IndexMap<String, Arc<FragmentDefinition>> {
        &self.fragments
    }

    pub fn fragment(&self, name: &str) -> Option<&Arc<FragmentDefinition>> {
        self.fragments.get(name)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The operation declared with `name`.
    pub fn operation_named(&self, name: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.name.as_deref() == Some(name))
    }
}
