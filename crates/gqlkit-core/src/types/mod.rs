//! The compiled, immutable type graph.

mod builtin_scalars;
mod directive;
mod enum_type;
mod field;
mod graphql_type;
mod graphql_type_kind;
mod input_object_type;
mod input_value;
mod interface_type;
mod object_type;
mod scalar_coercion;
mod scalar_type;
mod type_graph;
mod type_id;
mod type_ref;
mod union_type;

pub use builtin_scalars::BooleanScalar;
pub use builtin_scalars::FloatScalar;
pub use builtin_scalars::IdScalar;
pub use builtin_scalars::IntScalar;
pub use builtin_scalars::LongScalar;
pub use builtin_scalars::StringScalar;
pub(crate) use builtin_scalars::builtin_scalars;
pub use directive::Directive;
pub use enum_type::EnumType;
pub use field::Field;
pub use field::FieldResolver;
pub use field::ResolverFn;
pub use graphql_type::GraphQLType;
pub use graphql_type_kind::GraphQLTypeKind;
pub use input_object_type::InputObjectType;
pub use input_value::InputValue;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_coercion::ScalarCoercion;
pub use scalar_coercion::ScalarLiteral;
pub use scalar_type::ScalarType;
pub use type_graph::TypeGraph;
pub use type_id::TypeId;
pub use type_ref::TypeRef;
pub use union_type::UnionType;

#[cfg(test)]
mod tests;
