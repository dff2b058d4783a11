//! Descriptors a [`SchemaBuilder`](crate::schema::SchemaBuilder) compiles.
//!
//! Each type, field and resolver is registered explicitly; nothing is
//! discovered at runtime. Type references between descriptors are by name
//! (see [`TypeAnnotation`]) and are only resolved when the schema is built,
//! so descriptors may be registered in any order and may refer to each other
//! cyclically.

mod directive_def;
mod enum_type_def;
mod field_def;
mod input_object_type_def;
mod input_value_def;
mod object_type_def;
mod operation_def;
mod resolver;
mod scalar_type_def;
mod type_annotation;
mod union_type_def;

pub use directive_def::DirectiveDef;
pub use enum_type_def::EnumTypeDef;
pub use field_def::FieldDef;
pub use field_def::FieldSource;
pub use input_object_type_def::InputObjectTypeDef;
pub use input_value_def::InputValueDef;
pub use object_type_def::ObjectKind;
pub use object_type_def::ObjectTypeDef;
pub use operation_def::OperationDef;
pub use resolver::Resolver;
pub use scalar_type_def::ScalarTypeDef;
pub use type_annotation::TypeAnnotation;
pub use union_type_def::UnionTypeDef;
