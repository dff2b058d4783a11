use crate::types::ScalarCoercion;
use std::sync::Arc;

#[derive(Debug)]
pub struct ScalarType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) coercion: Arc<dyn ScalarCoercion>,
}

impl ScalarType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn coercion(&self) -> &dyn ScalarCoercion {
        self.coercion.as_ref()
    }
}
