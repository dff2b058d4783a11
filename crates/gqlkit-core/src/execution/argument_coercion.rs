use crate::GraphQLError;
use crate::Value;
use crate::execution::Variables;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::ScalarLiteral;
use crate::types::TypeGraph;
use crate::types::TypeId;
use crate::types::TypeRef;
use gqlkit_parser::ast::Arguments;
use gqlkit_parser::ast::RawValue;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, GraphQLError>;

/// Turns argument values as written in a document into the [`Value`]s a
/// resolver receives.
///
/// Variable references resolve against already-coerced variable values.
pub(crate) struct ArgumentCoercer<'a> {
    graph: &'a TypeGraph,
    variables: &'a Variables,
    accept_single_value_as_list: bool,
}

impl<'a> ArgumentCoercer<'a> {
    pub fn new(
        graph: &'a TypeGraph,
        variables: &'a Variables,
        accept_single_value_as_list: bool,
    ) -> Self {
        Self {
            graph,
            variables,
            accept_single_value_as_list,
        }
    }

    /// One value per declared argument, in declaration order. Omitted
    /// arguments take their declared default, or null.
    pub fn coerce_arguments(
        &self,
        declared: &IndexMap<String, InputValue>,
        supplied: &Arguments,
    ) -> Result<Vec<Value>> {
        declared.values()
            .map(|input| match supplied.get(input.name()) {
                Some(raw) => self.coerce(raw, input.type_ref()),
                None => Ok(input.default_value().cloned().unwrap_or_default()),
            })
            .collect()
    }

    pub fn coerce(&self, raw: &RawValue, type_ref: &TypeRef) -> Result<Value> {
        if let RawValue::Variable(name) = raw {
            return self.variable_value(name, type_ref);
        }
        if raw.is_null_literal() {
            return if type_ref.is_non_null() {
                Err(self.cannot_coerce(raw, type_ref, None))
            } else {
                Ok(Value::Null)
            };
        }

        match type_ref {
            TypeRef::NonNull(inner) => self.coerce(raw, inner),

            TypeRef::List(item_type) => match raw {
                RawValue::List(items) => items.iter()
                    .map(|item| self.coerce(item, item_type))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List),
                _ if self.accept_single_value_as_list => {
                    Ok(Value::List(vec![self.coerce(raw, item_type)?]))
                },
                _ => Err(self.cannot_coerce(raw, type_ref, None)),
            },

            TypeRef::Named(type_id) => self.coerce_named(raw, *type_id, type_ref),
        }
    }

    fn coerce_named(
        &self,
        raw: &RawValue,
        type_id: TypeId,
        type_ref: &TypeRef,
    ) -> Result<Value> {
        match self.graph.get(type_id) {
            GraphQLType::Scalar(scalar) => {
                let literal = match raw {
                    RawValue::String(_) => {
                        ScalarLiteral::String(raw.unquoted().unwrap_or_default())
                    },
                    RawValue::Literal(text) => ScalarLiteral::Bare(text),
                    RawValue::List(_) | RawValue::Variable(_) => {
                        return Err(self.cannot_coerce(raw, type_ref, None));
                    },
                };
                scalar.coercion()
                    .coerce_literal(literal)
                    .map_err(|err| self.cannot_coerce(raw, type_ref, Some(err)))
            },

            GraphQLType::Enum(enum_type) => match raw {
                RawValue::Literal(text) if enum_type.has_value(text) => {
                    Ok(Value::Enum(text.clone()))
                },
                _ => Err(self.cannot_coerce(raw, type_ref, None)),
            },

            GraphQLType::InputObject(input) => Err(GraphQLError::request(format!(
                "Cannot coerce `{raw}` to `{}`: input objects can only be supplied \
                through variables",
                input.name(),
            ))),

            _ => Err(self.cannot_coerce(raw, type_ref, None)),
        }
    }

    fn variable_value(&self, name: &str, type_ref: &TypeRef) -> Result<Value> {
        let value = self.variables.get(name).cloned().unwrap_or_default();
        if value.is_null() {
            return if type_ref.is_non_null() {
                Err(GraphQLError::request(format!(
                    "Variable `${name}` is null where `{}` is expected",
                    self.graph.type_ref_string(type_ref),
                )))
            } else {
                Ok(Value::Null)
            };
        }

        let wrap_in_list =
            self.accept_single_value_as_list
            && type_ref.is_list()
            && !matches!(value, Value::List(_));
        Ok(if wrap_in_list { Value::List(vec![value]) } else { value })
    }

    fn cannot_coerce(
        &self,
        raw: &RawValue,
        type_ref: &TypeRef,
        cause: Option<anyhow::Error>,
    ) -> GraphQLError {
        let type_name = self.graph.type_ref_string(type_ref);
        GraphQLError::request(match cause {
            Some(cause) => format!("Cannot coerce `{raw}` to `{type_name}`: {cause}"),
            None => format!("Cannot coerce `{raw}` to `{type_name}`"),
        })
    }
}
