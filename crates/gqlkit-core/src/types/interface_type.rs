use crate::types::Field;
use crate::types::TypeId;
use indexmap::IndexMap;

#[derive(Debug)]
pub struct InterfaceType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,

    /// Interfaces this interface itself extends (transitively).
    pub(crate) interfaces: Vec<TypeId>,

    /// Every compiled object type implementing this interface.
    pub(crate) possible_types: Vec<TypeId>,
}

impl InterfaceType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    pub fn possible_types(&self) -> &[TypeId] {
        &self.possible_types
    }
}
