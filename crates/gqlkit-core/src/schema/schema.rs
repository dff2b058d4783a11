use crate::DocumentCache;
use crate::GraphQLError;
use crate::execution::Executor;
use crate::operation::ExecutionPlan;
use crate::operation::RequestInterpreter;
use crate::operation::select_operation;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaConfiguration;
use crate::types::Directive;
use crate::types::GraphQLType;
use crate::types::TypeGraph;
use gqlkit_parser::ast::Document;
use std::sync::Arc;

type Result<T> = std::result::Result<T, GraphQLError>;

/// A compiled schema: the immutable [`TypeGraph`], its configuration and
/// (when enabled) a cache of parsed documents.
///
/// Cloning is cheap and clones share the type graph and the document cache,
/// so one schema can serve any number of concurrent requests.
#[derive(Clone, Debug)]
pub struct Schema {
    graph: Arc<TypeGraph>,
    config: SchemaConfiguration,
    document_cache: Option<DocumentCache>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub(crate) fn new(graph: TypeGraph, config: SchemaConfiguration) -> Self {
        let document_cache =
            config.use_caching_document_parser
                .then(|| DocumentCache::new(config.document_parser_cache_maximum_size));
        Self {
            graph: Arc::new(graph),
            config,
            document_cache,
        }
    }

    pub fn type_graph(&self) -> &Arc<TypeGraph> {
        &self.graph
    }

    pub fn configuration(&self) -> &SchemaConfiguration {
        &self.config
    }

    pub fn document_cache(&self) -> Option<&DocumentCache> {
        self.document_cache.as_ref()
    }

    pub fn type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.graph.type_named(name)
    }

    pub fn query_type(&self) -> &GraphQLType {
        self.graph.get(self.graph.query_type())
    }

    pub fn mutation_type(&self) -> Option<&GraphQLType> {
        self.graph.mutation_type().map(|id| self.graph.get(id))
    }

    /// Every type except the built-in scalars, in compilation order: the
    /// roots first, then types as they were first reached.
    pub fn defined_types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.graph.defined_types().map(|(_, graphql_type)| graphql_type)
    }

    /// Built-in directives first, then user directives in registration
    /// order.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.graph.directives().values()
    }

    /// Parses `query`, through the document cache when it is enabled.
    pub fn parse(&self, query: &str) -> Result<Arc<Document>> {
        let parsed = match &self.document_cache {
            Some(cache) => cache.get_or_parse(query),
            None => gqlkit_parser::parse_document(query).map(Arc::new),
        };
        Ok(parsed?)
    }

    /// Parses `query`, picks the operation to run and binds it to this
    /// schema.
    pub fn create_execution_plan(
        &self,
        query: &str,
        operation_name: Option<&str>,
    ) -> Result<ExecutionPlan> {
        let document = self.parse(query)?;
        let operation = select_operation(&document, operation_name)?;
        RequestInterpreter::new(&self.graph, self.config.accept_single_value_as_list)
            .interpret(operation)
    }

    /// Executes `query` and returns `{"data": ...}`.
    ///
    /// `variables` is a JSON object of variable values (or `null`).
    pub async fn execute_json(
        &self,
        query: &str,
        variables: &serde_json::Value,
        operation_name: Option<&str>,
    ) -> Result<serde_json::Value> {
        let plan = self.create_execution_plan(query, operation_name)?;
        let data = Executor::new(self.graph.clone(), &self.config)
            .execute(Arc::new(plan), variables)
            .await?;
        Ok(serde_json::json!({ "data": data }))
    }

    /// Executes `query` and serializes the response.
    ///
    /// With `wrap_errors` set, a failure is rendered as
    /// `{"errors": {"message": ...}}` and returned as `Ok`; otherwise it is
    /// returned as `Err`.
    pub async fn execute(
        &self,
        query: &str,
        variables: &serde_json::Value,
        operation_name: Option<&str>,
    ) -> Result<String> {
        let response = match self.execute_json(query, variables, operation_name).await {
            Ok(response) => response,
            Err(err) if self.config.wrap_errors => err.to_envelope(),
            Err(err) => return Err(err),
        };
        self.serialize(&response)
    }

    fn serialize(&self, response: &serde_json::Value) -> Result<String> {
        let serialized =
            if self.config.use_default_pretty_printer {
                serde_json::to_string_pretty(response)
            } else {
                serde_json::to_string(response)
            };
        serialized.map_err(|err| {
            GraphQLError::execution(format!("Failed to serialize the response: {err}"))
        })
    }
}
