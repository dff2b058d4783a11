use crate::Value;
use crate::descriptors::InputValueDef;
use crate::descriptors::TypeAnnotation;
use crate::types::ResolverFn;
use std::sync::Arc;

/// The uniform resolver contract: a return type, an ordered parameter list
/// and a callable invoked with the parent value and the coerced arguments
/// (one per parameter, in order).
///
/// Resolvers may block; each root field runs on its own blocking-capable
/// task.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) return_type: TypeAnnotation,
    pub(crate) parameters: Vec<InputValueDef>,
    pub(crate) func: ResolverFn,
}

impl Resolver {
    pub fn new<F>(return_type: TypeAnnotation, func: F) -> Self
    where
        F: Fn(&Value, Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            return_type,
            parameters: vec![],
            func: Arc::new(func),
        }
    }

    /// Appends a parameter. Arguments are passed in the order parameters
    /// were added.
    pub fn parameter(mut self, parameter: InputValueDef) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn return_type(&self) -> &TypeAnnotation {
        &self.return_type
    }

    pub fn parameters(&self) -> &[InputValueDef] {
        &self.parameters
    }

    pub fn invoke(&self, parent: &Value, args: Vec<Value>) -> anyhow::Result<Value> {
        (self.func)(parent, args)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("return_type", &self.return_type)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
