use crate::types::TypeId;

#[derive(Debug)]
pub struct UnionType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,

    /// Member object types, in declaration order. Never empty.
    pub(crate) possible_types: Vec<TypeId>,
}

impl UnionType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn possible_types(&self) -> &[TypeId] {
        &self.possible_types
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.possible_types.contains(&type_id)
    }
}
