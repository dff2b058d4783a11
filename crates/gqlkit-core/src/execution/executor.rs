use crate::GraphQLError;
use crate::execution::field_executor::FieldExecutor;
use crate::execution::field_executor::merge_field;
use crate::execution::variable_coercion::coerce_variables;
use crate::operation::ExecutionPlan;
use crate::schema::SchemaConfiguration;
use crate::types::TypeGraph;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

type Result<T> = std::result::Result<T, GraphQLError>;
type RootResult = Result<Option<serde_json::Value>>;

/// Executes plans against one [`TypeGraph`].
///
/// Every top-level node of a plan runs as its own blocking-capable task;
/// everything below a root node resolves synchronously on that task.
/// Completions are collected in whatever order they arrive and rendered in
/// plan order. The first failure cancels every sibling still in flight.
#[derive(Clone, Debug)]
pub struct Executor {
    graph: Arc<TypeGraph>,
    accept_single_value_as_list: bool,
    timeout: Option<Duration>,
}

impl Executor {
    pub fn new(graph: Arc<TypeGraph>, config: &SchemaConfiguration) -> Self {
        Self {
            graph,
            accept_single_value_as_list: config.accept_single_value_as_list,
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Runs `plan` with the supplied JSON variables (an object, or null for
    /// none) and returns the `data` object.
    pub async fn execute(
        &self,
        plan: Arc<ExecutionPlan>,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let variables = Arc::new(coerce_variables(
            &self.graph,
            plan.variables(),
            variables,
            self.accept_single_value_as_list,
        )?);

        let root_count = plan.nodes().len();
        tracing::debug!(
            "Executing {} with {root_count} root field(s).",
            plan.operation_kind().keyword(),
        );

        let cancellation = CancellationToken::new();
        let (sender, mut receiver) = mpsc::channel::<(usize, RootResult)>(root_count.max(1));
        let mut tasks = JoinSet::new();
        for idx in 0..root_count {
            let graph = self.graph.clone();
            let plan = plan.clone();
            let variables = variables.clone();
            let cancellation = cancellation.clone();
            let sender = sender.clone();
            let accept_single_value_as_list = self.accept_single_value_as_list;
            tasks.spawn_blocking(move || {
                let node = &plan.nodes()[idx];
                let result =
                    if cancellation.is_cancelled() {
                        Err(GraphQLError::execution(format!(
                            "Execution was cancelled before resolving `{}`",
                            node.response_key,
                        )))
                    } else {
                        FieldExecutor::new(
                            &graph,
                            &variables,
                            accept_single_value_as_list,
                            &cancellation,
                        ).execute_root(node, plan.root_type())
                    };
                tracing::trace!(
                    "Root field `{}` completed (ok: {}).",
                    node.response_key,
                    result.is_ok(),
                );
                // The receiver is gone once the request has already failed.
                let _ = sender.blocking_send((idx, result));
            });
        }
        drop(sender);

        let collected = collect_results(root_count, &mut receiver);
        let outcome = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, collected)
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!("Execution timed out after {}ms.", timeout.as_millis());
                    Err(GraphQLError::execution(format!(
                        "Execution timed out after {}ms",
                        timeout.as_millis(),
                    )))
                }),
            None => collected.await,
        };

        match outcome {
            Ok(results) => {
                let mut data = serde_json::Map::new();
                for (node, value) in plan.nodes().iter().zip(results) {
                    if let Some(value) = value {
                        merge_field(&mut data, &node.response_key, value);
                    }
                }
                tracing::debug!("Execution finished.");
                Ok(data)
            },

            Err(err) => {
                if root_count > 1 {
                    tracing::warn!("Cancelling in-flight root fields after failure: {err}");
                }
                cancellation.cancel();
                tasks.abort_all();
                Err(err)
            },
        }
    }
}

/// Receives exactly `expected` completions, or stops at the first failure.
/// The returned values are in plan order.
async fn collect_results(
    expected: usize,
    receiver: &mut mpsc::Receiver<(usize, RootResult)>,
) -> Result<Vec<Option<serde_json::Value>>> {
    let mut completed = HashMap::with_capacity(expected);
    while completed.len() < expected {
        let Some((idx, result)) = receiver.recv().await else {
            return Err(GraphQLError::execution(
                "A root field task ended without producing a result",
            ));
        };
        completed.insert(idx, result?);
    }
    Ok((0..expected).map(|idx| completed.remove(&idx).flatten()).collect())
}
