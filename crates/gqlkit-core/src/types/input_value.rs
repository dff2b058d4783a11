use crate::Value;
use crate::types::TypeRef;

/// A compiled argument, directive argument or input object field.
#[derive(Clone, Debug)]
pub struct InputValue {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) type_ref: TypeRef,
    pub(crate) default_value: Option<Value>,
}

impl InputValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Whether leaving this value out of an argument list is an error.
    pub fn is_required(&self) -> bool {
        self.type_ref.is_non_null() && self.default_value.is_none()
    }
}
