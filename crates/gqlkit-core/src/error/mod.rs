mod graphql_error;
mod graphql_error_kind;

pub use graphql_error::GraphQLError;
pub use graphql_error_kind::GraphQLErrorKind;
