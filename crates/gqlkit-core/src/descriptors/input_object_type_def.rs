use crate::descriptors::InputValueDef;

/// An input object type. Values arrive through variables only; object
/// literals are not part of the query language.
#[derive(Clone, Debug, Default)]
pub struct InputObjectTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValueDef>,
}

impl InputObjectTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: InputValueDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
