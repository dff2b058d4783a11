use crate::Value;
use crate::types::InputValue;
use crate::types::TypeRef;
use indexmap::IndexMap;
use std::sync::Arc;

/// A resolver function: receives the parent value (`Value::Null` for root
/// operations) and the coerced arguments in declaration order.
pub type ResolverFn =
    Arc<dyn Fn(&Value, Vec<Value>) -> anyhow::Result<Value> + Send + Sync>;

/// How a [`Field`] produces its value.
#[derive(Clone)]
pub enum FieldResolver {
    /// Reads the parent object's entry of the given name.
    Property(String),

    /// Calls a resolver function.
    Function(ResolverFn),

    /// The implicit `__typename` field.
    Typename,
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property(name) => f.debug_tuple("Property").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Typename => f.write_str("Typename"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) return_type: TypeRef,
    pub(crate) arguments: IndexMap<String, InputValue>,
    pub(crate) resolver: FieldResolver,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Declared arguments, in the order the resolver receives them.
    pub fn arguments(&self) -> &IndexMap<String, InputValue> {
        &self.arguments
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }
}
