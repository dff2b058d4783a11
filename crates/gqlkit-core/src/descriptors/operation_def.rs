use crate::descriptors::Resolver;

/// A root query or mutation field.
#[derive(Clone, Debug)]
pub struct OperationDef {
    pub name: String,
    pub description: Option<String>,
    pub resolver: Resolver,
}

impl OperationDef {
    pub fn new(name: impl Into<String>, resolver: Resolver) -> Self {
        Self {
            name: name.into(),
            description: None,
            resolver,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
