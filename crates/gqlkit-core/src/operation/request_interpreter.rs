use crate::GraphQLError;
use crate::execution::ArgumentCoercer;
use crate::execution::Variables;
use crate::operation::BoundDirective;
use crate::operation::BoundVariable;
use crate::operation::Children;
use crate::operation::ExecutionNode;
use crate::operation::ExecutionPlan;
use crate::schema::TYPENAME_FIELD_NAME;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::InputValue;
use crate::types::TypeGraph;
use crate::types::TypeId;
use crate::types::TypeRef;
use gqlkit_parser::ast::Arguments;
use gqlkit_parser::ast::Directives;
use gqlkit_parser::ast::Document;
use gqlkit_parser::ast::FieldSelection;
use gqlkit_parser::ast::Operation;
use gqlkit_parser::ast::OperationKind;
use gqlkit_parser::ast::RawValue;
use gqlkit_parser::ast::Selection;
use gqlkit_parser::ast::SelectionTree;
use gqlkit_parser::ast::TypeSyntax;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, GraphQLError>;

/// Picks the operation of `document` to run.
///
/// Without a name, the document must hold exactly one operation.
pub fn select_operation<'d>(
    document: &'d Document,
    operation_name: Option<&str>,
) -> Result<&'d Operation> {
    match operation_name {
        Some(name) => document.operation_named(name).ok_or_else(|| {
            GraphQLError::request(format!("The document has no operation named `{name}`"))
        }),
        None => match document.operations() {
            [operation] => Ok(operation),
            [] => Err(GraphQLError::request("The document contains no operations")),
            operations => Err(GraphQLError::request(format!(
                "The document contains {} operations; an operation name is required",
                operations.len(),
            ))),
        },
    }
}

/// What a selection inherits from the fragments enclosing it.
#[derive(Clone, Debug, Default)]
struct Inherited {
    type_conditions: Vec<TypeId>,
    directives: Vec<BoundDirective>,
}

impl Inherited {
    fn extend(
        &self,
        type_condition: Option<TypeId>,
        directives: Vec<BoundDirective>,
    ) -> Self {
        let mut type_conditions = self.type_conditions.clone();
        type_conditions.extend(type_condition);
        let mut all_directives = self.directives.clone();
        all_directives.extend(directives);
        Self {
            type_conditions,
            directives: all_directives,
        }
    }
}

/// Binds parsed operations to a [`TypeGraph`], producing
/// [`ExecutionPlan`]s.
///
/// Everything that can be checked without running a resolver is checked
/// here: field existence, argument sets, literal coercion, variable usage,
/// fragment applicability, directive names and selection-set shape.
pub struct RequestInterpreter<'g> {
    graph: &'g TypeGraph,
    accept_single_value_as_list: bool,
    no_variables: Variables,
}

impl<'g> RequestInterpreter<'g> {
    pub fn new(graph: &'g TypeGraph, accept_single_value_as_list: bool) -> Self {
        Self {
            graph,
            accept_single_value_as_list,
            no_variables: Variables::new(),
        }
    }

    pub fn interpret(&self, operation: &Operation) -> Result<ExecutionPlan> {
        let (operation_kind, root_type) = self.root_type(operation)?;
        let variables = self.bind_variables(operation)?;

        let mut nodes = vec![];
        self.bind_selection_set(
            &operation.selection_tree,
            root_type,
            &Inherited::default(),
            &variables,
            &mut nodes,
        )?;
        let nodes = self.merge_nodes(nodes)?;

        Ok(ExecutionPlan {
            operation_kind,
            root_type,
            variables,
            nodes,
        })
    }

    fn root_type(&self, operation: &Operation) -> Result<(OperationKind, TypeId)> {
        match operation.kind {
            Some(OperationKind::Query) => Ok((OperationKind::Query, self.graph.query_type())),
            Some(OperationKind::Mutation) => {
                Ok((OperationKind::Mutation, self.mutation_root()?))
            },
            None => self.infer_root_type(&operation.selection_tree),
        }
    }

    fn mutation_root(&self) -> Result<TypeId> {
        self.graph
            .mutation_type()
            .ok_or_else(|| GraphQLError::request("The schema defines no mutations"))
    }

    /// Every selected root field must exist on exactly one of the two roots,
    /// and all of them on the same one. Selecting nothing but `__typename`
    /// runs against the query root.
    fn infer_root_type(&self, tree: &SelectionTree) -> Result<(OperationKind, TypeId)> {
        let query_type = self.graph.query_type();
        let mutation_type = self.graph.mutation_type();

        let mut field_names = vec![];
        collect_field_names(tree, &mut field_names);

        let mut inferred = None;
        for name in field_names.into_iter().filter(|name| *name != TYPENAME_FIELD_NAME) {
            let on_query = self.graph.field(query_type, name).is_some();
            let on_mutation =
                mutation_type.is_some_and(|id| self.graph.field(id, name).is_some());
            let kind = match (on_query, on_mutation) {
                (true, false) => OperationKind::Query,
                (false, true) => OperationKind::Mutation,
                (true, true) => return Err(GraphQLError::request(format!(
                    "Cannot infer the operation type: `{name}` is both a query and a mutation",
                ))),
                (false, false) => return Err(GraphQLError::request(format!(
                    "Cannot infer the operation type: `{name}` is neither a query nor a mutation",
                ))),
            };
            match inferred {
                Some(previous) if previous != kind => return Err(GraphQLError::request(
                    "Cannot infer the operation type: the selection mixes queries and mutations",
                )),
                _ => inferred = Some(kind),
            }
        }

        match inferred.unwrap_or(OperationKind::Query) {
            OperationKind::Query => Ok((OperationKind::Query, query_type)),
            OperationKind::Mutation => Ok((OperationKind::Mutation, self.mutation_root()?)),
        }
    }

    fn bind_variables(&self, operation: &Operation) -> Result<Vec<BoundVariable>> {
        operation.variables
            .iter()
            .map(|decl| {
                let type_ref = self.variable_type(&decl.type_syntax, &decl.name)?;
                if let Some(default) = &decl.default_value {
                    if !default.variable_names().is_empty() {
                        return Err(GraphQLError::request(format!(
                            "The default value of `${}` cannot reference variables",
                            decl.name,
                        )));
                    }
                    self.literal_coercer().coerce(default, &type_ref)?;
                }
                Ok(BoundVariable {
                    name: decl.name.clone(),
                    type_ref,
                    default_value: decl.default_value.clone(),
                })
            })
            .collect()
    }

    fn variable_type(&self, syntax: &TypeSyntax, variable: &str) -> Result<TypeRef> {
        let type_ref = match syntax {
            TypeSyntax::Named { name, .. } => {
                let Some(type_id) = self.graph.type_id(name) else {
                    return Err(GraphQLError::request(format!(
                        "Variable `${variable}` has the unknown type `{name}`",
                    )));
                };
                let kind = self.graph.get(type_id).kind();
                if !kind.is_input() {
                    return Err(GraphQLError::request(format!(
                        "Variable `${variable}` has the {kind} type `{name}`, which is not \
                        an input type",
                    )));
                }
                TypeRef::Named(type_id)
            },
            TypeSyntax::List { of, .. } => TypeRef::list(self.variable_type(of, variable)?),
        };
        Ok(if syntax.nullable() { type_ref } else { TypeRef::non_null(type_ref) })
    }

    fn literal_coercer(&self) -> ArgumentCoercer<'_> {
        ArgumentCoercer::new(self.graph, &self.no_variables, self.accept_single_value_as_list)
    }

    /// Binds every selection of `tree` against `scope`, flattening fragments
    /// into `out`.
    fn bind_selection_set(
        &self,
        tree: &SelectionTree,
        scope: TypeId,
        inherited: &Inherited,
        variables: &[BoundVariable],
        out: &mut Vec<ExecutionNode>,
    ) -> Result<()> {
        for selection in tree {
            match selection {
                Selection::Field(field) => {
                    out.push(self.bind_field(field, scope, inherited, variables)?);
                },

                Selection::FragmentSpread(spread) => {
                    let condition = self.fragment_condition(
                        spread.type_condition(),
                        scope,
                        &format!("Fragment `{}`", spread.name()),
                    )?;
                    let mut directives =
                        self.bind_directives(spread.directives.as_ref(), variables)?;
                    directives.extend(
                        self.bind_directives(spread.fragment.directives.as_ref(), variables)?,
                    );
                    self.bind_selection_set(
                        spread.selection_tree(),
                        condition,
                        &inherited.extend(self.narrowing(scope, condition), directives),
                        variables,
                        out,
                    )?;
                },

                Selection::InlineFragment(inline) => {
                    let condition = match &inline.type_condition {
                        Some(name) => Some(self.fragment_condition(name, scope, "Inline fragment")?),
                        None => None,
                    };
                    let directives = self.bind_directives(inline.directives.as_ref(), variables)?;
                    self.bind_selection_set(
                        &inline.selection_tree,
                        condition.unwrap_or(scope),
                        &inherited.extend(
                            condition.and_then(|condition| self.narrowing(scope, condition)),
                            directives,
                        ),
                        variables,
                        out,
                    )?;
                },
            }
        }
        Ok(())
    }

    /// Binds the selection set of a union-typed field for one member type.
    ///
    /// Only fragments and `__typename` may appear; fragments whose type
    /// condition the member does not satisfy contribute nothing.
    fn bind_union_branch(
        &self,
        tree: &SelectionTree,
        union_type: TypeId,
        member: TypeId,
        inherited: &Inherited,
        variables: &[BoundVariable],
        out: &mut Vec<ExecutionNode>,
    ) -> Result<()> {
        for selection in tree {
            match selection {
                Selection::Field(field) => {
                    let scope =
                        if field.key == TYPENAME_FIELD_NAME {
                            member
                        } else {
                            union_type
                        };
                    out.push(self.bind_field(field, scope, inherited, variables)?);
                },

                Selection::FragmentSpread(spread) => {
                    let condition = self.fragment_condition(
                        spread.type_condition(),
                        union_type,
                        &format!("Fragment `{}`", spread.name()),
                    )?;
                    if !self.graph.type_satisfies(member, condition) {
                        continue;
                    }
                    let mut directives =
                        self.bind_directives(spread.directives.as_ref(), variables)?;
                    directives.extend(
                        self.bind_directives(spread.fragment.directives.as_ref(), variables)?,
                    );
                    self.bind_selection_set(
                        spread.selection_tree(),
                        condition,
                        &inherited.extend(None, directives),
                        variables,
                        out,
                    )?;
                },

                Selection::InlineFragment(inline) => {
                    let directives = self.bind_directives(inline.directives.as_ref(), variables)?;
                    let inherited = inherited.extend(None, directives);
                    match &inline.type_condition {
                        None => self.bind_union_branch(
                            &inline.selection_tree,
                            union_type,
                            member,
                            &inherited,
                            variables,
                            out,
                        )?,
                        Some(name) => {
                            let condition =
                                self.fragment_condition(name, union_type, "Inline fragment")?;
                            if self.graph.type_satisfies(member, condition) {
                                self.bind_selection_set(
                                    &inline.selection_tree,
                                    condition,
                                    &inherited,
                                    variables,
                                    out,
                                )?;
                            }
                        },
                    }
                },
            }
        }
        Ok(())
    }

    /// `condition` when it narrows `scope`; `None` when every value of
    /// `scope` already satisfies it.
    fn narrowing(&self, scope: TypeId, condition: TypeId) -> Option<TypeId> {
        (!self.graph.type_satisfies(scope, condition)).then_some(condition)
    }

    /// Resolves a fragment's type condition and checks that it can apply
    /// somewhere within `scope`.
    fn fragment_condition(&self, type_name: &str, scope: TypeId, what: &str) -> Result<TypeId> {
        let Some(condition) = self.graph.type_id(type_name) else {
            return Err(GraphQLError::request(format!(
                "{what} has the unknown type condition `{type_name}`",
            )));
        };
        let kind = self.graph.get(condition).kind();
        if !matches!(
            kind,
            GraphQLTypeKind::Interface | GraphQLTypeKind::Object | GraphQLTypeKind::Union,
        ) {
            return Err(GraphQLError::request(format!(
                "{what} has the type condition `{type_name}`, which is a {kind}; fragments \
                apply to object, interface and union types",
            )));
        }
        if !self.graph.types_overlap(scope, condition) {
            return Err(GraphQLError::request(format!(
                "{what} on `{type_name}` can never apply within `{}`",
                self.graph.get(scope).name(),
            )));
        }
        Ok(condition)
    }

    fn bind_field(
        &self,
        field: &FieldSelection,
        scope: TypeId,
        inherited: &Inherited,
        variables: &[BoundVariable],
    ) -> Result<ExecutionNode> {
        let scope_type = self.graph.get(scope);
        let lookup_type = match scope_type {
            GraphQLType::Union(union_type) => {
                if field.key != TYPENAME_FIELD_NAME {
                    return Err(GraphQLError::request(format!(
                        "Only fragments and `__typename` may be selected on union `{}`, \
                        found `{}`",
                        union_type.name(),
                        field.key,
                    )));
                }
                union_type.possible_types().first().copied().unwrap_or(scope)
            },
            _ => scope,
        };

        let Some(schema_field) = self.graph.field(lookup_type, &field.key) else {
            return Err(GraphQLError::request(format!(
                "Unknown field `{}` on type `{}`",
                field.key,
                scope_type.name(),
            )));
        };

        let owner = format!("{}.{}", scope_type.name(), field.key);
        self.validate_arguments(
            &owner,
            schema_field.arguments(),
            field.arguments.as_ref(),
            variables,
        )?;

        let mut directives = inherited.directives.clone();
        directives.extend(self.bind_directives(field.directives.as_ref(), variables)?);

        let children = self.bind_children(field, schema_field, &owner, variables)?;

        Ok(ExecutionNode {
            response_key: field.response_key().to_string(),
            field_name: field.key.clone(),
            parent_type: lookup_type,
            type_conditions: inherited.type_conditions.clone(),
            arguments: field.arguments.clone().unwrap_or_default(),
            directives,
            children,
        })
    }

    fn bind_children(
        &self,
        field: &FieldSelection,
        schema_field: &Field,
        owner: &str,
        variables: &[BoundVariable],
    ) -> Result<Children> {
        let return_id = schema_field.return_type().innermost();
        let return_type = self.graph.get(return_id);
        let tree = field.children.as_ref().filter(|tree| !tree.is_empty());

        if return_type.kind().is_leaf() {
            if tree.is_some() {
                return Err(GraphQLError::request(format!(
                    "`{owner}` returns the leaf type `{}` and cannot have a selection set",
                    return_type.name(),
                )));
            }
            return Ok(Children::Leaf);
        }

        let Some(tree) = tree else {
            return Err(GraphQLError::request(format!(
                "`{owner}` returns `{}` and requires a selection set",
                return_type.name(),
            )));
        };

        match return_type {
            GraphQLType::Union(union_type) => {
                let mut branches = IndexMap::new();
                for member in union_type.possible_types() {
                    let mut nodes = vec![];
                    self.bind_union_branch(
                        tree,
                        return_id,
                        *member,
                        &Inherited::default(),
                        variables,
                        &mut nodes,
                    )?;
                    if !nodes.is_empty() {
                        branches.insert(*member, self.merge_nodes(nodes)?);
                    }
                }
                Ok(Children::Union(branches))
            },

            _ => {
                let mut nodes = vec![];
                self.bind_selection_set(
                    tree,
                    return_id,
                    &Inherited::default(),
                    variables,
                    &mut nodes,
                )?;
                Ok(Children::Fields(self.merge_nodes(nodes)?))
            },
        }
    }

    /// Folds the flattened nodes of one selection set by response key.
    ///
    /// A node selecting the same field with the same arguments, type
    /// conditions and directives as an earlier node is merged into it (their
    /// children are combined), so the field resolves once. Two different
    /// fields or argument sets under one key are rejected unless their type
    /// conditions can never hold for the same value.
    fn merge_nodes(&self, nodes: Vec<ExecutionNode>) -> Result<Vec<ExecutionNode>> {
        let mut merged: Vec<ExecutionNode> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let mut target = None;
            for (idx, existing) in merged.iter().enumerate() {
                if existing.response_key != node.response_key {
                    continue;
                }
                let same_field =
                    existing.field_name == node.field_name
                        && existing.arguments == node.arguments;
                if !same_field {
                    if self.conditions_overlap(&existing.type_conditions, &node.type_conditions) {
                        return Err(GraphQLError::request(format!(
                            "Selections of `{}` and `{}` conflict under the response key \
                            `{}`: they differ in field or arguments",
                            existing.field_name,
                            node.field_name,
                            node.response_key,
                        )));
                    }
                } else if target.is_none()
                    && existing.type_conditions == node.type_conditions
                    && existing.directives == node.directives
                    && same_shape(&existing.children, &node.children)
                {
                    target = Some(idx);
                }
            }

            match target {
                Some(idx) => {
                    let existing = &mut merged[idx];
                    let children = std::mem::replace(&mut existing.children, Children::Leaf);
                    existing.children = self.merge_children(children, node.children)?;
                },
                None => merged.push(node),
            }
        }
        Ok(merged)
    }

    fn merge_children(&self, existing: Children, incoming: Children) -> Result<Children> {
        Ok(match (existing, incoming) {
            (Children::Fields(mut nodes), Children::Fields(more)) => {
                nodes.extend(more);
                Children::Fields(self.merge_nodes(nodes)?)
            },
            (Children::Union(mut branches), Children::Union(more)) => {
                for (member, nodes) in more {
                    branches.entry(member).or_default().extend(nodes);
                }
                let mut merged = IndexMap::with_capacity(branches.len());
                for (member, nodes) in branches {
                    merged.insert(member, self.merge_nodes(nodes)?);
                }
                Children::Union(merged)
            },
            (existing, _) => existing,
        })
    }

    /// Whether some runtime type can satisfy every condition of both lists.
    fn conditions_overlap(&self, left: &[TypeId], right: &[TypeId]) -> bool {
        left.iter().all(|left_condition| {
            right.iter().all(|right_condition| {
                self.graph.types_overlap(*left_condition, *right_condition)
            })
        })
    }

    fn bind_directives(
        &self,
        directives: Option<&Directives>,
        variables: &[BoundVariable],
    ) -> Result<Vec<BoundDirective>> {
        directives.into_iter()
            .flatten()
            .map(|invocation| {
                let Some(directive) = self.graph.directive(&invocation.name) else {
                    return Err(GraphQLError::syntax(format!(
                        "Unknown directive `@{}`",
                        invocation.name,
                    )));
                };
                self.validate_arguments(
                    &format!("@{}", invocation.name),
                    directive.arguments(),
                    Some(&invocation.arguments),
                    variables,
                )?;
                Ok(BoundDirective {
                    name: invocation.name.clone(),
                    arguments: invocation.arguments.clone(),
                })
            })
            .collect()
    }

    fn validate_arguments(
        &self,
        owner: &str,
        declared: &IndexMap<String, InputValue>,
        supplied: Option<&Arguments>,
        variables: &[BoundVariable],
    ) -> Result<()> {
        for (name, raw) in supplied.into_iter().flatten() {
            let Some(input) = declared.get(name) else {
                return Err(GraphQLError::validation(format!(
                    "Unknown argument `{name}` on `{owner}`",
                )));
            };
            if raw.is_null_literal() && input.type_ref().is_non_null() {
                return Err(GraphQLError::validation(format!(
                    "Argument `{name}` on `{owner}` has the non-null type `{}` but was \
                    given null",
                    self.graph.type_ref_string(input.type_ref()),
                )));
            }
            self.validate_value(raw, input.type_ref(), variables)?;
        }

        for input in declared.values() {
            let is_supplied = supplied.is_some_and(|args| args.contains_key(input.name()));
            if input.is_required() && !is_supplied {
                return Err(GraphQLError::validation(format!(
                    "Missing required argument `{}` of type `{}` on `{owner}`",
                    input.name(),
                    self.graph.type_ref_string(input.type_ref()),
                )));
            }
        }
        Ok(())
    }

    /// Literals are coerced up front so that a bad literal fails the request
    /// before any resolver runs; variable references are checked for type
    /// compatibility.
    fn validate_value(
        &self,
        raw: &RawValue,
        type_ref: &TypeRef,
        variables: &[BoundVariable],
    ) -> Result<()> {
        match raw {
            RawValue::Variable(name) => self.validate_variable_usage(name, type_ref, variables),

            RawValue::List(items) if !raw.variable_names().is_empty() => {
                let TypeRef::List(item_type) = type_ref.nullable() else {
                    return Err(GraphQLError::request(format!(
                        "Cannot coerce `{raw}` to `{}`",
                        self.graph.type_ref_string(type_ref),
                    )));
                };
                items.iter().try_for_each(|item| self.validate_value(item, item_type, variables))
            },

            _ => self.literal_coercer().coerce(raw, type_ref).map(|_| ()),
        }
    }

    fn validate_variable_usage(
        &self,
        name: &str,
        expected: &TypeRef,
        variables: &[BoundVariable],
    ) -> Result<()> {
        let Some(var) = variables.iter().find(|var| var.name == name) else {
            return Err(GraphQLError::request(format!(
                "Variable `${name}` is not declared by the operation",
            )));
        };
        let fits = variable_fits(
            &var.type_ref,
            var.default_value.is_some(),
            expected,
            self.accept_single_value_as_list,
        );
        if !fits {
            return Err(GraphQLError::validation(format!(
                "Variable `${name}` of type `{}` cannot be used where `{}` is expected",
                self.graph.type_ref_string(&var.type_ref),
                self.graph.type_ref_string(expected),
            )));
        }
        Ok(())
    }
}

/// Whether a variable declared as `var` may be passed where `expected` is
/// required. A nullable variable only fits a non-null position when it has
/// a default. With `accept_single_value_as_list`, a non-list variable fits a
/// list position when it fits the list's item type.
fn variable_fits(
    var: &TypeRef,
    has_default: bool,
    expected: &TypeRef,
    accept_single_value_as_list: bool,
) -> bool {
    let lenient = accept_single_value_as_list;
    if lenient && expected.is_list() && !var.is_list() {
        let TypeRef::List(expected_item) = expected.nullable() else {
            return false;
        };
        let nullability_fits = !expected.is_non_null() || var.is_non_null() || has_default;
        return nullability_fits && variable_fits(var, has_default, expected_item, lenient);
    }

    match (var, expected) {
        (TypeRef::NonNull(var_inner), TypeRef::NonNull(expected_inner)) => {
            variable_fits(var_inner, false, expected_inner, lenient)
        },
        (_, TypeRef::NonNull(expected_inner)) => {
            has_default && variable_fits(var, false, expected_inner, lenient)
        },
        (TypeRef::NonNull(var_inner), _) => {
            variable_fits(var_inner, false, expected, lenient)
        },
        (TypeRef::List(var_item), TypeRef::List(expected_item)) => {
            variable_fits(var_item, false, expected_item, lenient)
        },
        (TypeRef::Named(var_id), TypeRef::Named(expected_id)) => var_id == expected_id,
        _ => false,
    }
}

fn collect_field_names<'t>(tree: &'t SelectionTree, out: &mut Vec<&'t str>) {
    for selection in tree {
        match selection {
            Selection::Field(field) => out.push(&field.key),
            Selection::FragmentSpread(spread) => collect_field_names(spread.selection_tree(), out),
            Selection::InlineFragment(inline) => collect_field_names(&inline.selection_tree, out),
        }
    }
}

fn same_shape(left: &Children, right: &Children) -> bool {
    std::mem::discriminant(left) == std::mem::discriminant(right)
}
