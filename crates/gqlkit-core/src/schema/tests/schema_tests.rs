use crate::GraphQLErrorKind;
use crate::Value;
use crate::descriptors::OperationDef;
use crate::descriptors::Resolver;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaConfiguration;
use crate::tests::named;
use crate::tests::run;
use crate::tests::single_query_schema;
use crate::tests::star_wars_schema;
use crate::tests::star_wars_schema_builder;
use crate::types::GraphQLType;
use gqlkit_parser::ast::OperationKind;

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn configuration_defaults() {
    let config = SchemaConfiguration::default();
    assert!(config.use_caching_document_parser);
    assert_eq!(config.document_parser_cache_maximum_size, 1000);
    assert!(config.accept_single_value_as_list);
    assert!(!config.use_default_pretty_printer);
    assert!(config.wrap_errors);
    assert_eq!(config.timeout_ms, None);
}

#[test]
fn partial_configuration_fills_in_defaults() {
    let config: SchemaConfiguration = serde_json::from_value(serde_json::json!({
        "wrap_errors": false,
        "timeout_ms": 250,
    }))
    .unwrap();
    assert_eq!(config, SchemaConfiguration {
        wrap_errors: false,
        timeout_ms: Some(250),
        ..Default::default()
    });
}

// =============================================================================
// Introspection helpers
// =============================================================================

#[test]
fn roots_and_defined_types() {
    let schema = star_wars_schema();
    assert_eq!(schema.query_type().name(), "Query");
    assert_eq!(schema.mutation_type().map(GraphQLType::name), Some("Mutation"));

    let names: Vec<&str> = schema.defined_types().map(GraphQLType::name).collect();
    assert_eq!(&names[..2], &["Query", "Mutation"]);
    for expected in ["Character", "Human", "Droid", "Starship", "Review", "SearchResult",
                     "Episode", "LengthUnit", "ReviewInput"] {
        assert!(names.contains(&expected), "{expected} missing from {names:?}");
    }
    assert!(!names.contains(&"String"));
}

#[test]
fn builtin_directives_are_listed_first() {
    let schema = star_wars_schema();
    let directives: Vec<&str> = schema.directives().map(|d| d.name()).collect();
    assert_eq!(directives, vec!["skip", "include"]);
    let skip = schema.type_graph().directive("skip").unwrap();
    assert_eq!(
        schema.type_graph().type_ref_string(skip.arguments()["if"].type_ref()),
        "Boolean!",
    );
}

#[test]
fn execution_plan_describes_the_operation() {
    let schema = star_wars_schema();
    let plan = schema
        .create_execution_plan(
            "mutation M($r: ReviewInput!) { createReview(episode: JEDI, review: $r) { stars } }",
            Some("M"),
        )
        .unwrap();
    assert_eq!(plan.operation_kind(), OperationKind::Mutation);
    assert_eq!(plan.nodes().len(), 1);
    assert_eq!(plan.variables().len(), 1);
}

// =============================================================================
// Responses
// =============================================================================

#[test]
fn unwrapped_errors_are_returned_as_err() {
    let schema = star_wars_schema_builder()
        .configure(SchemaConfiguration {
            wrap_errors: false,
            ..Default::default()
        })
        .build()
        .unwrap();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();
    let err = runtime
        .block_on(schema.execute("query { droid { name } }", &serde_json::Value::Null, None))
        .unwrap_err();
    assert_eq!(err.kind(), GraphQLErrorKind::Request);
    assert_eq!(err.message(), "Unknown field `droid` on type `Query`");
}

#[test]
fn pretty_printed_responses() {
    let schema = SchemaBuilder::new()
        .query(OperationDef::new(
            "a",
            Resolver::new(named("String"), |_, _| Ok(Value::from("x"))),
        ))
        .configure(SchemaConfiguration {
            use_default_pretty_printer: true,
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(
        run(&schema, "{a}", serde_json::Value::Null),
        "{\n  \"data\": {\n    \"a\": \"x\"\n  }\n}",
    );
}

#[test]
fn parse_errors_are_wrapped() {
    let schema = single_query_schema(named("String"), Value::from("x"));
    let response: serde_json::Value =
        serde_json::from_str(&run(&schema, "{ a ", serde_json::Value::Null)).unwrap();
    let message = response["errors"]["message"].as_str().unwrap();
    assert!(message.starts_with("SyntaxError: "), "{message}");
    assert!(response.get("data").is_none());
}
