use crate::ObjectValue;
use crate::Value;
use crate::descriptors::FieldDef;
use crate::descriptors::ObjectTypeDef;
use crate::descriptors::OperationDef;
use crate::descriptors::Resolver;
use crate::execution::Executor;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaConfiguration;
use crate::tests::named;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

fn sleeping(millis: u64, value: i32) -> Resolver {
    Resolver::new(named("Int"), move |_, _| {
        std::thread::sleep(Duration::from_millis(millis));
        Ok(Value::from(value))
    })
}

/// Queries `a`, `b` and `c` finish in the reverse of their selection order.
fn staggered_schema() -> Schema {
    SchemaBuilder::new()
        .query(OperationDef::new("a", sleeping(300, 1)))
        .query(OperationDef::new("b", sleeping(150, 2)))
        .query(OperationDef::new("c", sleeping(10, 3)))
        .build()
        .unwrap()
}

/// `slow` takes 300ms to return an object whose `visit` field counts its
/// invocations; `fail` fails immediately.
fn failing_schema(config: SchemaConfiguration, visits: Arc<AtomicUsize>) -> Schema {
    SchemaBuilder::new()
        .query(OperationDef::new("slow", Resolver::new(named("Slow"), |_, _| {
            std::thread::sleep(Duration::from_millis(300));
            Ok(ObjectValue::new("Slow").into())
        })))
        .query(OperationDef::new("fail", Resolver::new(named("Int"), |_, _| {
            anyhow::bail!("kaboom")
        })))
        .object(ObjectTypeDef::object("Slow").field(FieldDef::resolver(
            "visit",
            Resolver::new(named("Int"), move |_, _| {
                Ok(Value::from(visits.fetch_add(1, Ordering::SeqCst) as i64))
            }),
        )))
        .configure(config)
        .build()
        .unwrap()
}

async fn respond(schema: &Schema, query: &str) -> String {
    schema.execute(query, &serde_json::Value::Null, None).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn results_render_in_selection_order() {
    let schema = staggered_schema();
    assert_eq!(respond(&schema, "{ a b c }").await, r#"{"data":{"a":1,"b":2,"c":3}}"#);
    assert_eq!(respond(&schema, "{ c a b }").await, r#"{"data":{"c":3,"a":1,"b":2}}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn root_fields_run_concurrently() {
    let schema = SchemaBuilder::new()
        .query(OperationDef::new("a", sleeping(200, 1)))
        .query(OperationDef::new("b", sleeping(200, 2)))
        .query(OperationDef::new("c", sleeping(200, 3)))
        .build()
        .unwrap();
    let started = Instant::now();
    respond(&schema, "{ a b c }").await;
    assert!(started.elapsed() < Duration::from_millis(500), "{:?}", started.elapsed());
}

#[tokio::test(flavor = "multi_thread")]
async fn first_failure_cancels_siblings() {
    let visits = Arc::new(AtomicUsize::new(0));
    let schema = failing_schema(SchemaConfiguration::default(), visits.clone());

    let started = Instant::now();
    let response = respond(&schema, "{ slow { visit } fail }").await;
    assert!(started.elapsed() < Duration::from_millis(250), "{:?}", started.elapsed());
    assert_eq!(
        response,
        r#"{"errors":{"message":"ExecutionError: Resolver for `fail` failed: kaboom"}}"#,
    );

    // `slow` is still sleeping; once it returns, nothing below it resolves.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(visits.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn timeout_fails_the_request() {
    let visits = Arc::new(AtomicUsize::new(0));
    let schema = failing_schema(
        SchemaConfiguration {
            timeout_ms: Some(50),
            ..Default::default()
        },
        visits.clone(),
    );
    assert_eq!(
        respond(&schema, "{ slow { visit } }").await,
        r#"{"errors":{"message":"ExecutionError: Execution timed out after 50ms"}}"#,
    );
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(visits.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_siblings_resolve_fully() {
    let visits = Arc::new(AtomicUsize::new(0));
    let schema = failing_schema(SchemaConfiguration::default(), visits.clone());
    assert_eq!(
        respond(&schema, "{ one: slow { visit } }").await,
        r#"{"data":{"one":{"visit":0}}}"#,
    );
    assert_eq!(visits.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn executor_returns_the_data_object() {
    let schema = staggered_schema();
    let plan = schema.create_execution_plan("{ b }", None).unwrap();
    let executor = Executor::new(schema.type_graph().clone(), schema.configuration());
    let data = executor
        .execute(Arc::new(plan), &serde_json::Value::Null)
        .await
        .unwrap();
    assert_eq!(serde_json::Value::Object(data), serde_json::json!({ "b": 2 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn one_schema_serves_concurrent_requests() {
    let schema = staggered_schema();
    let mut requests = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let schema = schema.clone();
        requests.spawn(async move { respond(&schema, "{ c b: c }").await });
    }
    while let Some(response) = requests.join_next().await {
        assert_eq!(response.unwrap(), r#"{"data":{"c":3,"b":3}}"#);
    }
}
