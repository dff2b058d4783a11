//! Running an [`ExecutionPlan`](crate::operation::ExecutionPlan): argument
//! and variable coercion, directive evaluation, result materialization and
//! the per-root-field task fan-out.

mod argument_coercion;
mod executor;
mod field_executor;
mod variable_coercion;

pub use executor::Executor;

pub(crate) use argument_coercion::ArgumentCoercer;

/// Coerced variable values by name. Declared variables that were neither
/// supplied nor defaulted are absent.
pub type Variables = indexmap::IndexMap<String, crate::Value>;

#[cfg(test)]
mod tests;
