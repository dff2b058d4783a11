use crate::Value;
use crate::descriptors::InputValueDef;
use crate::types::ResolverFn;
use std::sync::Arc;

/// A directive usable as `@name(args)` on selections.
///
/// The resolver is called with `Value::Null` as parent and the coerced
/// arguments, and must return `Value::Boolean(include)`.
#[derive(Clone)]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDef>,
    pub(crate) resolver: ResolverFn,
}

impl DirectiveDef {
    pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&Value, Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            arguments: vec![],
            resolver: Arc::new(resolver),
        }
    }

    pub fn argument(mut self, argument: InputValueDef) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for DirectiveDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveDef")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
