//! Schemas and data shared by the unit tests of every module.


use crate::ObjectValue;
use crate::Value;
use crate::descriptors::EnumTypeDef;
use crate::descriptors::FieldDef;
use crate::descriptors::InputObjectTypeDef;
use crate::descriptors::InputValueDef;
use crate::descriptors::ObjectTypeDef;
use crate::descriptors::OperationDef;
use crate::descriptors::Resolver;
use crate::descriptors::TypeAnnotation;
use crate::descriptors::UnionTypeDef;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaConfiguration;

pub(crate) fn named(name: &str) -> TypeAnnotation {
    TypeAnnotation::named(name)
}

pub(crate) fn non_null(name: &str) -> TypeAnnotation {
    TypeAnnotation::named(name).non_null()
}

fn episodes(names: &[&str]) -> Value {
    Value::List(names.iter().map(|name| Value::Enum(name.to_string())).collect())
}

fn human(id: &str, name: &str, home_planet: Option<&str>, height: f64, friends: &[&str]) -> Value {
    ObjectValue::new("Human")
        .with("id", id)
        .with("name", name)
        .with("homePlanet", home_planet)
        .with("heightMeters", height)
        .with("friendIds", friends.to_vec())
        .with("appearsIn", episodes(&["NEWHOPE", "EMPIRE", "JEDI"]))
        .into()
}

fn droid(id: &str, name: &str, primary_function: &str, friends: &[&str]) -> Value {
    ObjectValue::new("Droid")
        .with("id", id)
        .with("name", name)
        .with("primaryFunction", primary_function)
        .with("friendIds", friends.to_vec())
        .with("appearsIn", episodes(&["NEWHOPE", "EMPIRE", "JEDI"]))
        .into()
}

fn starship(id: &str, name: &str, length: f64) -> Value {
    ObjectValue::new("Starship")
        .with("id", id)
        .with("name", name)
        .with("length", length)
        .into()
}

/// Luke (1000), Han (1002) and R2-D2 (2001).
pub(crate) fn character(id: &str) -> Option<Value> {
    match id {
        "1000" => Some(human("1000", "Luke Skywalker", Some("Tatooine"), 1.72, &["1002", "2001"])),
        "1002" => Some(human("1002", "Han Solo", None, 1.8, &["1000", "2001"])),
        "2001" => Some(droid("2001", "R2-D2", "Astromech", &["1000", "1002"])),
        _ => None,
    }
}

fn search_results(text: &str) -> Vec<Value> {
    let mut results: Vec<Value> =
        ["1000", "1002", "2001"].iter()
            .filter_map(|id| character(id))
            .collect();
    results.push(starship("3000", "Millennium Falcon", 34.37));
    results.retain(|value| {
        value.as_object()
            .and_then(|object| object.get("name"))
            .and_then(Value::as_str)
            .is_some_and(|name| name.contains(text))
    });
    results
}

fn character_type() -> ObjectTypeDef {
    ObjectTypeDef::interface("Character")
        .description("A person or droid in the saga.")
        .field(FieldDef::property("id", non_null("ID")))
        .field(FieldDef::property("name", non_null("String")))
        .field(FieldDef::property(
            "appearsIn",
            TypeAnnotation::list(non_null("Episode")).non_null(),
        ))
        .field(FieldDef::resolver("friends", Resolver::new(
            TypeAnnotation::list(non_null("Character")).non_null(),
            |parent, _| {
                let friends = parent.as_object()
                    .and_then(|object| object.get("friendIds"))
                    .and_then(Value::as_list)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(character)
                    .collect::<Vec<_>>();
                Ok(Value::List(friends))
            },
        )))
}

fn human_type() -> ObjectTypeDef {
    ObjectTypeDef::object("Human")
        .implements("Character")
        .field(FieldDef::property("homePlanet", named("String")))
        .field(FieldDef::resolver("height", Resolver::new(
            named("Float"),
            |parent, args| {
                let meters = parent.as_object()
                    .and_then(|object| object.get("heightMeters"))
                    .and_then(Value::as_f64)
                    .unwrap_or_default();
                Ok(match args[0].as_str() {
                    Some("FOOT") => Value::Float(meters * 3.28084),
                    _ => Value::Float(meters),
                })
            },
        ).parameter(
            InputValueDef::new("unit", named("LengthUnit"))
                .default_value(Value::Enum("METER".to_string())),
        )))
}

fn droid_type() -> ObjectTypeDef {
    ObjectTypeDef::object("Droid")
        .implements("Character")
        .field(FieldDef::property("primaryFunction", named("String")))
}

fn starship_type() -> ObjectTypeDef {
    ObjectTypeDef::object("Starship")
        .field(FieldDef::property("id", non_null("ID")))
        .field(FieldDef::property("name", non_null("String")))
        .field(FieldDef::property("length", named("Float")))
}

fn review_type() -> ObjectTypeDef {
    ObjectTypeDef::object("Review")
        .field(FieldDef::property("episode", named("Episode")))
        .field(FieldDef::property("stars", non_null("Int")))
        .field(FieldDef::property("commentary", named("String")))
}

/// A schema with an interface (`Character`), two implementations, a union
/// (`SearchResult`), enums, an input object and one mutation.
pub(crate) fn star_wars_schema_builder() -> SchemaBuilder {
    SchemaBuilder::new()
        .query(OperationDef::new("hero", Resolver::new(
            named("Character"),
            |_, args| Ok(match args[0].as_str() {
                Some("EMPIRE") => character("1000"),
                _ => character("2001"),
            }.unwrap_or_default()),
        ).parameter(InputValueDef::new("episode", named("Episode")))))
        .query(OperationDef::new("human", Resolver::new(
            named("Human"),
            |_, args| Ok(args[0].as_str().and_then(character).unwrap_or_default()),
        ).parameter(InputValueDef::new("id", non_null("ID")))))
        .query(OperationDef::new("characters", Resolver::new(
            TypeAnnotation::list(named("Character")).non_null(),
            |_, args| Ok(Value::List(
                args[0].as_list()
                    .unwrap_or_default()
                    .iter()
                    .map(|id| id.as_str().and_then(character).unwrap_or_default())
                    .collect(),
            )),
        ).parameter(InputValueDef::new("ids", TypeAnnotation::list(non_null("ID")).non_null()))))
        .query(OperationDef::new("search", Resolver::new(
            TypeAnnotation::list(non_null("SearchResult")).non_null(),
            |_, args| Ok(Value::List(search_results(args[0].as_str().unwrap_or_default()))),
        ).parameter(InputValueDef::new("text", non_null("String")))))
        .mutation(OperationDef::new("createReview", Resolver::new(
            named("Review"),
            |_, args| {
                let review = args[1].as_object().cloned().unwrap_or_default();
                Ok(ObjectValue::new("Review")
                    .with("episode", args[0].clone())
                    .with("stars", review.get("stars").cloned().unwrap_or_default())
                    .with("commentary", review.get("commentary").cloned().unwrap_or_default())
                    .into())
            },
        )
        .parameter(InputValueDef::new("episode", non_null("Episode")))
        .parameter(InputValueDef::new("review", non_null("ReviewInput")))))
        .object(character_type())
        .object(human_type())
        .object(droid_type())
        .object(starship_type())
        .object(review_type())
        .union(UnionTypeDef::new("SearchResult").member("Human").member("Droid").member("Starship"))
        .enum_type(EnumTypeDef::new("Episode", ["NEWHOPE", "EMPIRE", "JEDI"]))
        .enum_type(EnumTypeDef::new("LengthUnit", ["METER", "FOOT"]))
        .input_object(
            InputObjectTypeDef::new("ReviewInput")
                .field(InputValueDef::new("stars", non_null("Int")))
                .field(InputValueDef::new("commentary", named("String"))),
        )
}

pub(crate) fn star_wars_schema() -> Schema {
    star_wars_schema_builder()
        .build()
        .expect("the star wars schema compiles")
}

pub(crate) fn star_wars_schema_with(config: SchemaConfiguration) -> Schema {
    star_wars_schema_builder()
        .configure(config)
        .build()
        .expect("the star wars schema compiles")
}

/// A schema with the single query `a` returning `value` as `return_type`.
pub(crate) fn single_query_schema(return_type: TypeAnnotation, value: Value) -> Schema {
    SchemaBuilder::new()
        .query(OperationDef::new("a", Resolver::new(
            return_type,
            move |_, _| Ok(value.clone()),
        )))
        .build()
        .expect("the single query schema compiles")
}

/// Runs `query` against `schema` and returns the serialized response.
pub(crate) fn run(schema: &Schema, query: &str, variables: serde_json::Value) -> String {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("a runtime can be built");
    runtime
        .block_on(schema.execute(query, &variables, None))
        .expect("errors are wrapped")
}

/// Runs `query` against `schema` and returns the `data` (or `errors`)
/// envelope as JSON.
pub(crate) fn run_json(schema: &Schema, query: &str, variables: serde_json::Value) -> serde_json::Value {
    serde_json::from_str(&run(schema, query, variables))
        .expect("responses are valid JSON")
}

/// The `errors.message` of a failed response.
pub(crate) fn error_message(response: &serde_json::Value) -> &str {
    response["errors"]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("expected an error response, got {response}"))
}
