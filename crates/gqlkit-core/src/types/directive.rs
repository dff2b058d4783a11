use crate::types::InputValue;
use crate::types::ResolverFn;
use indexmap::IndexMap;

/// A compiled directive. Its resolver receives the coerced arguments and
/// must return a `Value::Boolean`: `true` to include the annotated
/// selection.
#[derive(Clone)]
pub struct Directive {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) arguments: IndexMap<String, InputValue>,
    pub(crate) resolver: ResolverFn,
}

impl Directive {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValue> {
        &self.arguments
    }

    pub fn resolver(&self) -> &ResolverFn {
        &self.resolver
    }
}

impl std::fmt::Debug for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directive")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
