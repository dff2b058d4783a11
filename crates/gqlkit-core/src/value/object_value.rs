use crate::Value;
use indexmap::IndexMap;

/// An object value and the name of its concrete runtime type.
///
/// The type name is what `__typename`, interface dispatch and union branch
/// selection use to find the object's compiled type. An empty name means
/// "untagged"; such values are treated as instances of whatever static type
/// the field that produced them declares.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl ObjectValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn from_fields(
        type_name: impl Into<String>,
        fields: IndexMap<String, Value>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Builder-style [`ObjectValue::insert()`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}
