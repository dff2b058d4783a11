use crate::GraphQLError;
use crate::ObjectValue;
use crate::Value;
use crate::execution::Variables;
use crate::execution::argument_coercion::ArgumentCoercer;
use crate::operation::Children;
use crate::operation::ExecutionNode;
use crate::types::FieldResolver;
use crate::types::GraphQLType;
use crate::types::TypeGraph;
use crate::types::TypeId;
use crate::types::TypeRef;
use tokio_util::sync::CancellationToken;

type Result<T> = std::result::Result<T, GraphQLError>;

/// Resolves one root node and everything below it, synchronously, into
/// response JSON.
pub(crate) struct FieldExecutor<'a> {
    graph: &'a TypeGraph,
    coercer: ArgumentCoercer<'a>,
    cancellation: &'a CancellationToken,
}

impl<'a> FieldExecutor<'a> {
    pub fn new(
        graph: &'a TypeGraph,
        variables: &'a Variables,
        accept_single_value_as_list: bool,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            graph,
            coercer: ArgumentCoercer::new(graph, variables, accept_single_value_as_list),
            cancellation,
        }
    }

    /// Executes a top-level node against the operation's root type.
    ///
    /// Returns `None` when a directive or type condition excludes the node.
    pub fn execute_root(
        &self,
        node: &ExecutionNode,
        root_type: TypeId,
    ) -> Result<Option<serde_json::Value>> {
        if !self.applies(node, root_type)? {
            return Ok(None);
        }
        self.resolve_field(node, &Value::Null, root_type, &node.response_key)
            .map(Some)
    }

    fn applies(&self, node: &ExecutionNode, runtime_type: TypeId) -> Result<bool> {
        let conditions_hold = node.type_conditions
            .iter()
            .all(|condition| self.graph.type_satisfies(runtime_type, *condition));
        if !conditions_hold {
            return Ok(false);
        }
        self.evaluate_directives(node)
    }

    /// Every directive on the node must evaluate to `true`.
    fn evaluate_directives(&self, node: &ExecutionNode) -> Result<bool> {
        for bound in &node.directives {
            let Some(directive) = self.graph.directive(&bound.name) else {
                return Err(GraphQLError::syntax(format!("Unknown directive `@{}`", bound.name)));
            };
            let args = self.coercer.coerce_arguments(directive.arguments(), &bound.arguments)?;
            match (directive.resolver())(&Value::Null, args) {
                Ok(Value::Boolean(true)) => (),
                Ok(Value::Boolean(false)) => return Ok(false),
                Ok(other) => return Err(GraphQLError::execution(format!(
                    "Directive `@{}` returned {} `{other}` instead of a Boolean",
                    bound.name,
                    other.kind_name(),
                ))),
                Err(err) => return Err(GraphQLError::execution(format!(
                    "Directive `@{}` failed: {err}",
                    bound.name,
                ))),
            }
        }
        Ok(true)
    }

    fn resolve_field(
        &self,
        node: &ExecutionNode,
        parent: &Value,
        runtime_type: TypeId,
        path: &str,
    ) -> Result<serde_json::Value> {
        let field = self.graph
            .field(runtime_type, &node.field_name)
            .or_else(|| self.graph.field(node.parent_type, &node.field_name))
            .ok_or_else(|| GraphQLError::execution(format!(
                "Type `{}` has no field `{}`",
                self.graph.get(runtime_type).name(),
                node.field_name,
            )))?;

        if self.cancellation.is_cancelled() {
            return Err(GraphQLError::execution(format!(
                "Execution was cancelled before resolving `{path}`",
            )));
        }

        let value = match field.resolver() {
            FieldResolver::Typename => {
                Value::String(self.graph.get(runtime_type).name().to_string())
            },
            FieldResolver::Property(name) => parent.as_object()
                .and_then(|object| object.get(name))
                .cloned()
                .unwrap_or_default(),
            FieldResolver::Function(resolver) => {
                let args = self.coercer.coerce_arguments(field.arguments(), &node.arguments)?;
                resolver(parent, args).map_err(|err| GraphQLError::execution(format!(
                    "Resolver for `{path}` failed: {err}",
                )))?
            },
        };

        self.complete_value(node, field.return_type(), value, path)
    }

    fn complete_value(
        &self,
        node: &ExecutionNode,
        type_ref: &TypeRef,
        value: Value,
        path: &str,
    ) -> Result<serde_json::Value> {
        match type_ref {
            TypeRef::NonNull(inner) => {
                if value.is_null() {
                    return Err(GraphQLError::execution(format!(
                        "`{path}` of non-null type `{}` resolved to null",
                        self.graph.type_ref_string(type_ref),
                    )));
                }
                self.complete_value(node, inner, value, path)
            },

            _ if value.is_null() => Ok(serde_json::Value::Null),

            TypeRef::List(item_type) => match value {
                Value::List(items) => items.into_iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        self.complete_value(node, item_type, item, &format!("{path}.{idx}"))
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(serde_json::Value::Array),
                other => Err(GraphQLError::execution(format!(
                    "`{path}` of list type `{}` resolved to the {} `{other}`",
                    self.graph.type_ref_string(type_ref),
                    other.kind_name(),
                ))),
            },

            TypeRef::Named(type_id) => self.complete_named(node, *type_id, value, path),
        }
    }

    fn complete_named(
        &self,
        node: &ExecutionNode,
        type_id: TypeId,
        value: Value,
        path: &str,
    ) -> Result<serde_json::Value> {
        match self.graph.get(type_id) {
            GraphQLType::Scalar(scalar) => scalar.coercion()
                .serialize(&value)
                .map_err(|err| GraphQLError::execution(format!("`{path}`: {err}"))),

            GraphQLType::Enum(enum_type) => match value.as_str() {
                Some(name) if enum_type.has_value(name) => {
                    Ok(serde_json::Value::String(name.to_string()))
                },
                _ => Err(GraphQLError::execution(format!(
                    "`{path}` resolved to `{value}`, which is not a value of enum `{}`",
                    enum_type.name(),
                ))),
            },

            GraphQLType::InputObject(input) => Err(GraphQLError::execution(format!(
                "`{path}` cannot return the input type `{}`",
                input.name(),
            ))),

            composite => {
                let Value::Object(object) = &value else {
                    return Err(GraphQLError::execution(format!(
                        "`{path}` of type `{}` resolved to the {} `{value}`",
                        composite.name(),
                        value.kind_name(),
                    )));
                };
                let runtime_type = self.runtime_type(object, type_id);
                let nodes = match &node.children {
                    Children::Fields(nodes) => nodes.as_slice(),
                    Children::Union(branches) => match branches.get(&runtime_type) {
                        Some(nodes) => nodes.as_slice(),
                        None => return Err(GraphQLError::execution(format!(
                            "No selection on union `{}` applies to the runtime type `{}` \
                            at `{path}`",
                            composite.name(),
                            self.runtime_type_name(object),
                        ))),
                    },
                    Children::Leaf => return Err(GraphQLError::execution(format!(
                        "`{path}` of type `{}` has no selection set",
                        composite.name(),
                    ))),
                };
                self.execute_selection(nodes, &value, runtime_type, path)
                    .map(serde_json::Value::Object)
            },
        }
    }

    /// The compiled object type a runtime value is an instance of.
    ///
    /// Falls back to the static type when the value is untagged or names a
    /// type that cannot appear in this position.
    fn runtime_type(&self, object: &ObjectValue, static_type: TypeId) -> TypeId {
        self.graph
            .type_id(object.type_name())
            .filter(|type_id| {
                self.graph.get(*type_id).as_object().is_some()
                    && self.graph.type_satisfies(*type_id, static_type)
            })
            .unwrap_or(static_type)
    }

    fn runtime_type_name<'v>(&self, object: &'v ObjectValue) -> &'v str {
        match object.type_name() {
            "" => "<untagged>",
            type_name => type_name,
        }
    }

    fn execute_selection(
        &self,
        nodes: &[ExecutionNode],
        parent: &Value,
        runtime_type: TypeId,
        path: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut result = serde_json::Map::new();
        for node in nodes {
            if node.children.is_leaf() && result.contains_key(&node.response_key) {
                continue;
            }
            if !self.applies(node, runtime_type)? {
                continue;
            }
            let child_path = format!("{path}.{}", node.response_key);
            let value = self.resolve_field(node, parent, runtime_type, &child_path)?;
            merge_field(&mut result, &node.response_key, value);
        }
        Ok(result)
    }
}

/// Inserts `value` under `key`. When the key is already present (selected
/// twice through fragments) the first value wins, except that objects are
/// merged key by key and equally long lists entry by entry.
pub(crate) fn merge_field(
    target: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: serde_json::Value,
) {
    match target.get_mut(key) {
        None => {
            target.insert(key.to_string(), value);
        },
        Some(existing) => merge_value(existing, value),
    }
}

fn merge_value(existing: &mut serde_json::Value, incoming: serde_json::Value) {
    match (existing, incoming) {
        (serde_json::Value::Object(existing), serde_json::Value::Object(incoming)) => {
            for (incoming_key, incoming_value) in incoming {
                merge_field(existing, &incoming_key, incoming_value);
            }
        },
        (serde_json::Value::Array(existing), serde_json::Value::Array(incoming))
            if existing.len() == incoming.len() =>
        {
            for (existing_item, incoming_item) in existing.iter_mut().zip(incoming) {
                merge_value(existing_item, incoming_item);
            }
        },
        _ => (),
    }
}
