use crate::types::ScalarCoercion;
use std::sync::Arc;

/// A user-defined scalar and its coercion rules.
#[derive(Clone, Debug)]
pub struct ScalarTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub coercion: Arc<dyn ScalarCoercion>,
}

impl ScalarTypeDef {
    pub fn new(name: impl Into<String>, coercion: impl ScalarCoercion + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            coercion: Arc::new(coercion),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
