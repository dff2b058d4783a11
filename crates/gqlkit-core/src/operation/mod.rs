//! Binding parsed operations to a compiled [`TypeGraph`](crate::types::TypeGraph).

mod execution_node;
mod execution_plan;
mod request_interpreter;

pub use execution_node::BoundDirective;
pub use execution_node::Children;
pub use execution_node::ExecutionNode;
pub use execution_plan::BoundVariable;
pub use execution_plan::ExecutionPlan;
pub use request_interpreter::RequestInterpreter;
pub use request_interpreter::select_operation;

#[cfg(test)]
mod tests;
