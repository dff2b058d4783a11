//! Schema compiler, request interpreter and concurrent executor.
//!
//! A [`Schema`](schema::Schema) is compiled once from the descriptors in
//! [`descriptors`] by a [`SchemaBuilder`](schema::SchemaBuilder). Each request
//! is then parsed (see `gqlkit-parser`), bound against the compiled
//! [`TypeGraph`](types::TypeGraph) into an
//! [`ExecutionPlan`](operation::ExecutionPlan) and executed with one task per
//! root field.

pub mod descriptors;
mod document_cache;
pub mod error;
pub mod execution;
pub mod operation;
pub mod schema;
pub mod types;
pub mod value;

pub use document_cache::DocumentCache;
pub use error::GraphQLError;
pub use error::GraphQLErrorKind;
pub use value::ObjectValue;
pub use value::Value;

#[cfg(test)]
mod tests;
