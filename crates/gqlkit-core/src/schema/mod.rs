#[allow(clippy::module_inception)]
mod schema;
mod schema_build_error;
mod schema_builder;
mod schema_configuration;
mod type_compiler;

pub use schema::Schema;
pub use schema_build_error::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use schema_configuration::SchemaConfiguration;

pub(crate) use type_compiler::TYPENAME_FIELD_NAME;

#[cfg(test)]
mod tests;
