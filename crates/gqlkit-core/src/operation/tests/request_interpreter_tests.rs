use crate::GraphQLError;
use crate::GraphQLErrorKind;
use crate::Value;
use crate::descriptors::OperationDef;
use crate::descriptors::Resolver;
use crate::operation::Children;
use crate::operation::ExecutionNode;
use crate::operation::ExecutionPlan;
use crate::operation::RequestInterpreter;
use crate::operation::select_operation;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::tests::named;
use crate::tests::star_wars_schema;
use gqlkit_parser::ast::OperationKind;
use gqlkit_parser::parse_document;

fn plan(schema: &Schema, query: &str) -> ExecutionPlan {
    schema
        .create_execution_plan(query, None)
        .unwrap_or_else(|err| panic!("`{query}` failed to bind: {err}"))
}

fn bind_err(schema: &Schema, query: &str) -> GraphQLError {
    match schema.create_execution_plan(query, None) {
        Ok(plan) => panic!("expected `{query}` to fail, got {plan:?}"),
        Err(err) => err,
    }
}

fn assert_bind_err(query: &str, kind: GraphQLErrorKind, message: &str) {
    let err = bind_err(&star_wars_schema(), query);
    assert_eq!((err.kind(), err.message()), (kind, message), "{query}");
}

fn child_nodes(node: &ExecutionNode) -> &[ExecutionNode] {
    match &node.children {
        Children::Fields(nodes) => nodes,
        other => panic!("expected fields below `{}`, got {other:?}", node.response_key),
    }
}

/// A schema where `a` is a query and `reset` a mutation.
fn query_and_mutation_schema() -> Schema {
    let constant = || Resolver::new(named("Int"), |_, _| Ok(Value::Int(1)));
    SchemaBuilder::new()
        .query(OperationDef::new("a", constant()))
        .mutation(OperationDef::new("reset", constant()))
        .build()
        .unwrap()
}

// =============================================================================
// Root selection
// =============================================================================

mod roots {
    use super::*;

    #[test]
    fn explicit_operation_kinds() {
        let schema = query_and_mutation_schema();
        assert_eq!(plan(&schema, "query { a }").operation_kind(), OperationKind::Query);
        let mutation = plan(&schema, "mutation { reset }");
        assert_eq!(mutation.operation_kind(), OperationKind::Mutation);
        assert_eq!(Some(mutation.root_type()), schema.type_graph().mutation_type());
    }

    #[test]
    fn shorthand_infers_the_root() {
        let schema = query_and_mutation_schema();
        assert_eq!(plan(&schema, "{ a }").operation_kind(), OperationKind::Query);
        assert_eq!(plan(&schema, "{ reset }").operation_kind(), OperationKind::Mutation);
        assert_eq!(plan(&schema, "{ again: reset }").operation_kind(), OperationKind::Mutation);
        assert_eq!(plan(&schema, "{ __typename }").operation_kind(), OperationKind::Query);
    }

    #[test]
    fn shorthand_inference_failures() {
        let schema = query_and_mutation_schema();
        assert_eq!(
            bind_err(&schema, "{ a reset }").message(),
            "Cannot infer the operation type: the selection mixes queries and mutations",
        );
        assert_eq!(
            bind_err(&schema, "{ b }").message(),
            "Cannot infer the operation type: `b` is neither a query nor a mutation",
        );
    }

    #[test]
    fn fields_are_looked_up_on_the_selected_root() {
        let schema = query_and_mutation_schema();
        let err = bind_err(&schema, "query { reset }");
        assert_eq!(err.kind(), GraphQLErrorKind::Request);
        assert_eq!(err.message(), "Unknown field `reset` on type `Query`");
    }

    #[test]
    fn mutation_without_mutation_root() {
        let schema = SchemaBuilder::new()
            .query(OperationDef::new("a", Resolver::new(named("Int"), |_, _| Ok(Value::Null))))
            .build()
            .unwrap();
        assert_eq!(
            bind_err(&schema, "mutation { a }").message(),
            "The schema defines no mutations",
        );
    }

    #[test]
    fn interpreter_binds_a_selected_operation() {
        let schema = star_wars_schema();
        let document = parse_document("query A { hero { name } } query B { __typename }").unwrap();
        let operation = select_operation(&document, Some("A")).unwrap();
        let plan = RequestInterpreter::new(schema.type_graph(), true)
            .interpret(operation)
            .unwrap();
        assert_eq!(plan.nodes().len(), 1);
        assert_eq!(plan.nodes()[0].field_name, "hero");
    }
}

// =============================================================================
// Fields and selection sets
// =============================================================================

mod fields {
    use super::*;

    #[test]
    fn unknown_nested_field() {
        assert_bind_err(
            "{ hero { mass } }",
            GraphQLErrorKind::Request,
            "Unknown field `mass` on type `Character`",
        );
    }

    #[test]
    fn leaf_fields_cannot_have_selections() {
        assert_bind_err(
            "{ hero { name { first } } }",
            GraphQLErrorKind::Request,
            "`Character.name` returns the leaf type `String` and cannot have a selection set",
        );
    }

    #[test]
    fn composite_fields_need_selections() {
        assert_bind_err(
            "{ hero }",
            GraphQLErrorKind::Request,
            "`Query.hero` returns `Character` and requires a selection set",
        );
    }

    #[test]
    fn nodes_keep_aliases_and_selection_order() {
        let schema = star_wars_schema();
        let plan = plan(&schema, "{ luke: human(id: 1000) { name id } r2: hero { name } }");
        let keys: Vec<&str> = plan.nodes().iter().map(|n| n.response_key.as_str()).collect();
        assert_eq!(keys, vec!["luke", "r2"]);
        assert_eq!(plan.nodes()[0].field_name, "human");

        let children: Vec<&str> =
            child_nodes(&plan.nodes()[0]).iter().map(|n| n.field_name.as_str()).collect();
        assert_eq!(children, vec!["name", "id"]);
    }

    #[test]
    fn fragments_are_flattened_with_their_conditions() {
        let schema = star_wars_schema();
        let graph = schema.type_graph();
        let plan = plan(
            &schema,
            "{ hero { ...Names ... on Human { homePlanet } } }
             fragment Names on Character { name }",
        );
        let children = child_nodes(&plan.nodes()[0]);
        assert_eq!(children.len(), 2);

        // Every `Character` satisfies `Names`, so it does not narrow.
        assert_eq!(children[0].field_name, "name");
        assert!(children[0].type_conditions.is_empty());

        assert_eq!(children[1].field_name, "homePlanet");
        assert_eq!(children[1].type_conditions, vec![graph.type_id("Human").unwrap()]);
        assert_eq!(Some(children[1].parent_type), graph.type_id("Human"));
    }

    #[test]
    fn nested_fragments_narrow_to_the_inner_condition() {
        let schema = star_wars_schema();
        let droid = schema.type_graph().type_id("Droid").unwrap();
        let plan = plan(&schema, "{ hero { ... on Character { ... on Droid { primaryFunction } } } }");
        let children = child_nodes(&plan.nodes()[0]);
        assert_eq!(children[0].type_conditions, vec![droid]);
    }

    #[test]
    fn nested_fragments_keep_the_outer_condition() {
        let schema = star_wars_schema();
        let droid = schema.type_graph().type_id("Droid").unwrap();

        let inline = plan(&schema, "{ hero { ... on Droid { ... on Character { name } } } }");
        assert_eq!(child_nodes(&inline.nodes()[0])[0].type_conditions, vec![droid]);

        let spreads = plan(
            &schema,
            "{ hero { ...D } }
             fragment D on Droid { ...C }
             fragment C on Character { name }",
        );
        assert_eq!(child_nodes(&spreads.nodes()[0])[0].type_conditions, vec![droid]);
    }
}

// =============================================================================
// Fragment applicability
// =============================================================================

mod fragments {
    use super::*;

    #[test]
    fn conditions_that_can_never_apply() {
        assert_bind_err(
            "{ hero { ... on Starship { length } } }",
            GraphQLErrorKind::Request,
            "Inline fragment on `Starship` can never apply within `Character`",
        );
        assert_bind_err(
            "{ hero { ...Ship } } fragment Ship on Starship { name }",
            GraphQLErrorKind::Request,
            "Fragment `Ship` on `Starship` can never apply within `Character`",
        );
    }

    #[test]
    fn unknown_conditions() {
        assert_bind_err(
            "{ hero { ... on Wookiee { name } } }",
            GraphQLErrorKind::Request,
            "Inline fragment has the unknown type condition `Wookiee`",
        );
    }

    #[test]
    fn conditions_on_leaf_types() {
        let err = bind_err(&star_wars_schema(), "{ hero { ... on Episode { name } } }");
        assert_eq!(err.kind(), GraphQLErrorKind::Request);
        assert!(
            err.message().starts_with("Inline fragment has the type condition `Episode`"),
            "{err}",
        );
    }

    #[test]
    fn fragment_directives_are_inherited() {
        let schema = star_wars_schema();
        let plan = plan(&schema, "{ hero { ... @include(if: true) { name } id } }");
        let children = child_nodes(&plan.nodes()[0]);
        assert_eq!(children[0].directives.len(), 1);
        assert_eq!(children[0].directives[0].name, "include");
        assert!(children[1].directives.is_empty());
    }
}

// =============================================================================
// Unions
// =============================================================================

mod unions {
    use super::*;

    #[test]
    fn only_fragments_and_typename() {
        assert_bind_err(
            r#"{ search(text: "a") { name } }"#,
            GraphQLErrorKind::Request,
            "Only fragments and `__typename` may be selected on union `SearchResult`, found `name`",
        );
    }

    #[test]
    fn one_branch_per_member() {
        let schema = star_wars_schema();
        let graph = schema.type_graph();
        let plan = plan(
            &schema,
            r#"{ search(text: "o") { __typename ... on Droid { primaryFunction } ... on Character { name } } }"#,
        );
        let Children::Union(branches) = &plan.nodes()[0].children else {
            panic!("expected union branches, got {:?}", plan.nodes()[0].children);
        };

        let human = graph.type_id("Human").unwrap();
        let droid = graph.type_id("Droid").unwrap();
        let starship = graph.type_id("Starship").unwrap();
        assert_eq!(branches.keys().copied().collect::<Vec<_>>(), vec![human, droid, starship]);

        let keys = |id| branches[&id].iter().map(|n| n.field_name.as_str()).collect::<Vec<_>>();
        assert_eq!(keys(human), vec!["__typename", "name"]);
        assert_eq!(keys(droid), vec!["__typename", "primaryFunction", "name"]);
        assert_eq!(keys(starship), vec!["__typename"]);
    }

    #[test]
    fn members_no_selection_applies_to_get_no_branch() {
        let schema = star_wars_schema();
        let plan = plan(&schema, r#"{ search(text: "o") { ... on Starship { length } } }"#);
        let Children::Union(branches) = &plan.nodes()[0].children else {
            panic!("expected union branches");
        };
        assert_eq!(branches.len(), 1);
        assert!(branches.contains_key(&schema.type_graph().type_id("Starship").unwrap()));
    }
}

// =============================================================================
// Response keys shared by several selections
// =============================================================================

mod response_keys {
    use super::*;

    #[test]
    fn different_fields_under_one_key_conflict() {
        assert_bind_err(
            "{ hero { name ... on Human { name: homePlanet } } }",
            GraphQLErrorKind::Request,
            "Selections of `name` and `homePlanet` conflict under the response key `name`: \
            they differ in field or arguments",
        );
    }

    #[test]
    fn different_arguments_under_one_root_key_conflict() {
        assert_bind_err(
            r#"{ human(id: "1000") { name } ...F }
               fragment F on Query { human(id: "1002") { name } }"#,
            GraphQLErrorKind::Request,
            "Selections of `human` and `human` conflict under the response key `human`: \
            they differ in field or arguments",
        );
    }

    #[test]
    fn exclusive_type_conditions_may_share_a_key() {
        let schema = star_wars_schema();
        let plan = plan(
            &schema,
            "{ hero { ... on Human { info: homePlanet } ... on Droid { info: primaryFunction } } }",
        );
        let fields = child_nodes(&plan.nodes()[0])
            .iter()
            .map(|node| (node.response_key.as_str(), node.field_name.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(fields, vec![("info", "homePlanet"), ("info", "primaryFunction")]);
    }

    #[test]
    fn identical_root_selections_are_folded() {
        let schema = star_wars_schema();
        let plan = plan(
            &schema,
            r#"{ human(id: "1000") { name } ...F }
               fragment F on Query { human(id: "1000") { id name } }"#,
        );
        assert_eq!(plan.nodes().len(), 1);
        let keys = child_nodes(&plan.nodes()[0])
            .iter()
            .map(|node| node.response_key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["name", "id"]);
    }

    #[test]
    fn identical_nested_selections_are_folded() {
        let schema = star_wars_schema();
        let plan = plan(
            &schema,
            "{ hero { friends { name } ...F } } fragment F on Character { friends { id } }",
        );
        let hero_children = child_nodes(&plan.nodes()[0]);
        assert_eq!(hero_children.len(), 1);
        let keys = child_nodes(&hero_children[0])
            .iter()
            .map(|node| node.response_key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["name", "id"]);
    }
}

// =============================================================================
// Arguments
// =============================================================================

mod arguments {
    use super::*;

    #[test]
    fn missing_required_argument() {
        assert_bind_err(
            "{ human { name } }",
            GraphQLErrorKind::Validation,
            "Missing required argument `id` of type `ID!` on `Query.human`",
        );
    }

    #[test]
    fn unknown_argument() {
        assert_bind_err(
            r#"{ human(id: "1000", planet: "Tatooine") { name } }"#,
            GraphQLErrorKind::Validation,
            "Unknown argument `planet` on `Query.human`",
        );
    }

    #[test]
    fn null_for_non_null_argument() {
        assert_bind_err(
            "{ human(id: null) { name } }",
            GraphQLErrorKind::Validation,
            "Argument `id` on `Query.human` has the non-null type `ID!` but was given null",
        );
    }

    #[test]
    fn literals_are_coerced_while_binding() {
        assert_bind_err(
            "{ hero(episode: PHANTOM) { name } }",
            GraphQLErrorKind::Request,
            "Cannot coerce `PHANTOM` to `Episode`",
        );
        assert_bind_err(
            "{ human(id: 1.5) { name } }",
            GraphQLErrorKind::Request,
            "Cannot coerce `1.5` to `ID`: expected a string or an integer",
        );
    }

    #[test]
    fn directive_arguments_are_validated() {
        assert_bind_err(
            "{ hero @skip { name } }",
            GraphQLErrorKind::Validation,
            "Missing required argument `if` of type `Boolean!` on `@skip`",
        );
    }

    #[test]
    fn unknown_directive_is_a_syntax_error() {
        assert_bind_err(
            "{ hero @deprecated { name } }",
            GraphQLErrorKind::Syntax,
            "Unknown directive `@deprecated`",
        );
    }

    #[test]
    fn single_value_for_list_argument() {
        let schema = star_wars_schema();
        assert!(schema.create_execution_plan(r#"{ characters(ids: "1000") { name } }"#, None).is_ok());

        let strict = RequestInterpreter::new(schema.type_graph(), false);
        let document = parse_document(r#"{ characters(ids: "1000") { name } }"#).unwrap();
        let err = strict.interpret(&document.operations()[0]).unwrap_err();
        assert_eq!(err.message(), r#"Cannot coerce `"1000"` to `[ID!]`"#);
    }
}

// =============================================================================
// Variables
// =============================================================================

mod variables {
    use super::*;

    #[test]
    fn declared_variables_are_bound() {
        let schema = star_wars_schema();
        let plan = plan(&schema, r#"query Q($id: ID!, $unit: LengthUnit = FOOT) {
            human(id: $id) { height(unit: $unit) }
        }"#);
        assert_eq!(plan.variables().len(), 2);
        let unit = plan.variable("unit").unwrap();
        assert_eq!(
            schema.type_graph().type_ref_string(&unit.type_ref),
            "LengthUnit",
        );
        assert!(unit.default_value.is_some());
    }

    #[test]
    fn undeclared_variable() {
        assert_bind_err(
            "query { human(id: $id) { name } }",
            GraphQLErrorKind::Request,
            "Variable `$id` is not declared by the operation",
        );
    }

    #[test]
    fn nullable_variable_in_non_null_position() {
        assert_bind_err(
            "query Q($id: ID) { human(id: $id) { name } }",
            GraphQLErrorKind::Validation,
            "Variable `$id` of type `ID` cannot be used where `ID!` is expected",
        );
        let schema = star_wars_schema();
        plan(&schema, r#"query Q($id: ID = "1000") { human(id: $id) { name } }"#);
    }

    #[test]
    fn mismatched_variable_type() {
        assert_bind_err(
            "query Q($e: LengthUnit) { hero(episode: $e) { name } }",
            GraphQLErrorKind::Validation,
            "Variable `$e` of type `LengthUnit` cannot be used where `Episode` is expected",
        );
    }

    #[test]
    fn variables_inside_list_literals() {
        let schema = star_wars_schema();
        plan(&schema, r#"query Q($a: ID!) { characters(ids: [$a, "1002"]) { name } }"#);
        assert_bind_err(
            r#"query Q($a: ID) { characters(ids: [$a, "1002"]) { name } }"#,
            GraphQLErrorKind::Validation,
            "Variable `$a` of type `ID` cannot be used where `ID!` is expected",
        );
    }

    #[test]
    fn single_variable_for_list_depends_on_leniency() {
        let schema = star_wars_schema();
        let query = "query Q($id: ID!) { characters(ids: $id) { name } }";
        plan(&schema, query);

        let document = parse_document(query).unwrap();
        let err = RequestInterpreter::new(schema.type_graph(), false)
            .interpret(&document.operations()[0])
            .unwrap_err();
        assert_eq!(err.kind(), GraphQLErrorKind::Validation);
    }

    #[test]
    fn variable_types_must_be_known_input_types() {
        assert_bind_err(
            "query Q($x: Wookiee) { hero { name } }",
            GraphQLErrorKind::Request,
            "Variable `$x` has the unknown type `Wookiee`",
        );
        let err = bind_err(&star_wars_schema(), "query Q($x: Human) { hero { name } }");
        assert_eq!(err.kind(), GraphQLErrorKind::Request);
        assert!(err.message().contains("which is not an input type"), "{err}");
    }

    #[test]
    fn defaults_are_coerced() {
        assert_bind_err(
            "query Q($e: Episode = PHANTOM) { hero(episode: $e) { name } }",
            GraphQLErrorKind::Request,
            "Cannot coerce `PHANTOM` to `Episode`",
        );
    }
}
