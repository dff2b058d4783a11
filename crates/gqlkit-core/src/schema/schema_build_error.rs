use crate::types::GraphQLTypeKind;
use gqlkit_parser::ast::OperationKind;

/// A fatal problem found while compiling a schema.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("Multiple directives were defined with the name `{directive_name}`")]
    DuplicateDirectiveDefinition {
        directive_name: String,
    },

    #[error("Enum `{enum_name}` defines the value `{value}` more than once")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        value: String,
    },

    #[error("Type `{type_name}` defines the field `{field_name}` more than once")]
    DuplicateFieldDefinition {
        type_name: String,
        field_name: String,
    },

    #[error("`{owner}` declares the input value `{input_name}` more than once")]
    DuplicateInputValueDefinition {
        owner: String,
        input_name: String,
    },

    #[error(
        "Multiple {} operations were defined with the name `{operation_name}`",
        .operation_kind.keyword()
    )]
    DuplicateOperationDefinition {
        operation_kind: OperationKind,
        operation_name: String,
    },

    #[error("Multiple types were defined with the name `{type_name}`")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error("Union `{union_name}` lists `{member_name}` more than once")]
    DuplicateUnionMember {
        union_name: String,
        member_name: String,
    },

    #[error("Enum `{type_name}` must define one or more values")]
    EnumWithNoValues {
        type_name: String,
    },

    #[error("`{type_name}` implements `{interface_name}`, which is not an interface but a {interface_kind}")]
    ImplementsNonInterface {
        type_name: String,
        interface_name: String,
        interface_kind: GraphQLTypeKind,
    },

    #[error("`{referenced_by}` uses the input type `{type_name}` as an output type")]
    InputTypeInOutputPosition {
        type_name: String,
        referenced_by: String,
    },

    #[error("Union `{union_name}` has the {member_kind} `{member_name}` as a member; members must be object types")]
    InvalidUnionMember {
        union_name: String,
        member_name: String,
        member_kind: GraphQLTypeKind,
    },

    #[error("`{name}` is invalid: names starting with `__` are reserved")]
    InvalidDunderPrefixedName {
        name: String,
    },

    #[error("`{referenced_by}` declares the nested list type `{annotation}`")]
    NestedListType {
        referenced_by: String,
        annotation: String,
    },

    #[error("A schema must define at least one query")]
    NoQueries,

    #[error("`{referenced_by}` uses the {type_kind} `{type_name}` as an input type")]
    OutputTypeInInputPosition {
        type_name: String,
        type_kind: GraphQLTypeKind,
        referenced_by: String,
    },

    #[error("`{type_name}` is reserved for a root operation type")]
    ReservedRootTypeName {
        type_name: String,
    },

    #[error("{type_kind} `{type_name}` must define one or more fields")]
    TypeWithNoFields {
        type_name: String,
        type_kind: GraphQLTypeKind,
    },

    #[error("`{referenced_by}` refers to the undefined type `{type_name}`")]
    UndefinedType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Union `{type_name}` must have one or more member types")]
    UnionWithNoMembers {
        type_name: String,
    },
}
