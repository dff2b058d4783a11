use crate::GraphQLError;
use crate::ObjectValue;
use crate::Value;
use crate::execution::Variables;
use crate::execution::argument_coercion::ArgumentCoercer;
use crate::operation::BoundVariable;
use crate::types::GraphQLType;
use crate::types::TypeGraph;
use crate::types::TypeRef;

type Result<T> = std::result::Result<T, GraphQLError>;

/// Coerces the supplied JSON variables against an operation's declared
/// variables.
///
/// Supplied entries the operation does not declare are ignored. A declared
/// variable that is absent takes its default; a non-null one without a
/// default must be supplied.
pub(crate) fn coerce_variables(
    graph: &TypeGraph,
    declared: &[BoundVariable],
    supplied: &serde_json::Value,
    accept_single_value_as_list: bool,
) -> Result<Variables> {
    let no_entries = serde_json::Map::new();
    let supplied = match supplied {
        serde_json::Value::Null => &no_entries,
        serde_json::Value::Object(entries) => entries,
        other => return Err(GraphQLError::request(format!(
            "Variables must be a JSON object, found `{other}`",
        ))),
    };

    let coercer = JsonCoercer {
        graph,
        accept_single_value_as_list,
    };
    let no_variables = Variables::new();
    let literals = ArgumentCoercer::new(graph, &no_variables, accept_single_value_as_list);

    let mut variables = Variables::with_capacity(declared.len());
    for var in declared {
        match (supplied.get(&var.name), &var.default_value) {
            (Some(json), _) => {
                let value = coercer.coerce(json, &var.type_ref, &var.name)?;
                variables.insert(var.name.clone(), value);
            },
            (None, Some(default)) => {
                variables.insert(var.name.clone(), literals.coerce(default, &var.type_ref)?);
            },
            (None, None) if var.type_ref.is_non_null() => {
                return Err(GraphQLError::request(format!(
                    "Variable `${}` of required type `{}` was not provided",
                    var.name,
                    graph.type_ref_string(&var.type_ref),
                )));
            },
            (None, None) => (),
        }
    }
    Ok(variables)
}

struct JsonCoercer<'a> {
    graph: &'a TypeGraph,
    accept_single_value_as_list: bool,
}

impl JsonCoercer<'_> {
    /// `path` names the variable (and the position inside it) for error
    /// messages, e.g. `review.stars` or `ids[2]`.
    fn coerce(
        &self,
        json: &serde_json::Value,
        type_ref: &TypeRef,
        path: &str,
    ) -> Result<Value> {
        if json.is_null() {
            return if type_ref.is_non_null() {
                Err(GraphQLError::request(format!(
                    "Variable `${path}` of type `{}` must not be null",
                    self.graph.type_ref_string(type_ref),
                )))
            } else {
                Ok(Value::Null)
            };
        }

        match type_ref {
            TypeRef::NonNull(inner) => self.coerce(json, inner, path),

            TypeRef::List(item_type) => match json {
                serde_json::Value::Array(items) => items.iter()
                    .enumerate()
                    .map(|(idx, item)| self.coerce(item, item_type, &format!("{path}[{idx}]")))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List),
                _ if self.accept_single_value_as_list => {
                    Ok(Value::List(vec![self.coerce(json, item_type, path)?]))
                },
                _ => Err(self.cannot_coerce(json, type_ref, path, None)),
            },

            TypeRef::Named(type_id) => match self.graph.get(*type_id) {
                GraphQLType::Scalar(scalar) => scalar.coercion()
                    .coerce_json(json)
                    .map_err(|err| self.cannot_coerce(json, type_ref, path, Some(err))),

                GraphQLType::Enum(enum_type) => json.as_str()
                    .filter(|name| enum_type.has_value(name))
                    .map(|name| Value::Enum(name.to_string()))
                    .ok_or_else(|| self.cannot_coerce(json, type_ref, path, None)),

                GraphQLType::InputObject(input) => {
                    let Some(entries) = json.as_object() else {
                        return Err(self.cannot_coerce(json, type_ref, path, None));
                    };
                    if let Some(unknown) = entries.keys().find(|key| !input.fields().contains_key(*key)) {
                        return Err(GraphQLError::request(format!(
                            "Variable `${path}` has the field `{unknown}`, which input \
                            type `{}` does not define",
                            input.name(),
                        )));
                    }

                    let mut object = ObjectValue::new(input.name());
                    for (field_name, field) in input.fields() {
                        match (entries.get(field_name), field.default_value()) {
                            (Some(entry), _) => {
                                let field_path = format!("{path}.{field_name}");
                                object.insert(
                                    field_name.clone(),
                                    self.coerce(entry, field.type_ref(), &field_path)?,
                                );
                            },
                            (None, Some(default)) => object.insert(field_name.clone(), default.clone()),
                            (None, None) if field.type_ref().is_non_null() => {
                                return Err(GraphQLError::request(format!(
                                    "Variable `${path}` is missing the required field \
                                    `{field_name}` of input type `{}`",
                                    input.name(),
                                )));
                            },
                            (None, None) => (),
                        }
                    }
                    Ok(Value::Object(object))
                },

                _ => Err(self.cannot_coerce(json, type_ref, path, None)),
            },
        }
    }

    fn cannot_coerce(
        &self,
        json: &serde_json::Value,
        type_ref: &TypeRef,
        path: &str,
        cause: Option<anyhow::Error>,
    ) -> GraphQLError {
        let type_name = self.graph.type_ref_string(type_ref);
        GraphQLError::request(match cause {
            Some(cause) => format!(
                "Cannot coerce `{json}` to `{type_name}` for variable `${path}`: {cause}",
            ),
            None => format!("Cannot coerce `{json}` to `{type_name}` for variable `${path}`"),
        })
    }
}
