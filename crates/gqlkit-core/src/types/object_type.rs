use crate::types::Field;
use crate::types::TypeId;
use indexmap::IndexMap;

#[derive(Debug)]
pub struct ObjectType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,

    /// Every interface this object implements, directly or through another
    /// interface.
    pub(crate) interfaces: Vec<TypeId>,
}

impl ObjectType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared fields in declaration order, followed by fields inherited
    /// from interfaces and the implicit `__typename`.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    pub fn implements(&self, interface: TypeId) -> bool {
        self.interfaces.contains(&interface)
    }
}
