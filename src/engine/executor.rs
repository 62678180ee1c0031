// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{EstimateSize, ResultCache};
use crate::engine::options::{ExecutionOptions, Strategy};
use crate::engine::{parallel, sequential};
use crate::errors::{ExecutionError, NodeFailure, OperationError};
use crate::graph::{Graph, GraphNode, NodeId};
use crate::observability::messages::engine::{
    ConcurrencyClamped, ExecutionCompleted, ExecutionStarted, LeafOperationFailed,
    StrategyDegraded,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{CostEstimate, Operation, ValidationReport};

/// Cache of full per-leaf outputs, keyed by operation name and leaf id.
pub type NodeCache<T> = ResultCache<Vec<GraphNode<T>>>;

/// Counters reported for one `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionMetrics {
    pub duration: Duration,
    /// Always the number of leaves the call started with.
    pub nodes_processed: usize,
    pub nodes_created: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Estimated tokens of the leaves the operation actually ran on.
    pub tokens_consumed: u64,
}

/// Aggregate outcome of one `execute` call. The caller merges `new_nodes`
/// into its graph.
#[derive(Debug, Clone)]
pub struct ExecutionResult<T> {
    pub new_nodes: Vec<GraphNode<T>>,
    pub errors: Vec<NodeFailure>,
    pub metrics: ExecutionMetrics,
}

impl<T> ExecutionResult<T> {
    fn empty() -> Self {
        Self {
            new_nodes: Vec::new(),
            errors: Vec::new(),
            metrics: ExecutionMetrics::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheLookup {
    Disabled,
    Hit,
    Miss,
}

/// What happened to a single leaf.
pub(crate) struct LeafOutcome<T> {
    pub node_id: NodeId,
    pub result: Result<Vec<GraphNode<T>>, OperationError>,
    pub lookup: CacheLookup,
    pub tokens: u64,
}

fn cache_key(operation: &str, node_id: NodeId) -> String {
    format!("{}:{}", operation, node_id)
}

/// Check the cache for one leaf and apply the operation on a miss.
///
/// Only successful outputs are cached.
pub(crate) async fn run_leaf<T>(
    leaf: &GraphNode<T>,
    operation: &dyn Operation<T>,
    cache: Option<&NodeCache<T>>,
) -> LeafOutcome<T>
where
    T: Clone + EstimateSize + Send + Sync,
{
    let node_id = leaf.id();
    let key = cache.map(|_| cache_key(operation.name(), node_id));

    if let (Some(cache), Some(key)) = (cache, key.as_deref()) {
        if let Some(nodes) = cache.get(key).await {
            return LeafOutcome {
                node_id,
                result: Ok(nodes),
                lookup: CacheLookup::Hit,
                tokens: 0,
            };
        }
    }

    let tokens = operation.estimate_cost(leaf).token_cost;
    let result = operation.apply(leaf).await;

    if let (Some(cache), Some(key), Ok(nodes)) = (cache, key, &result) {
        cache.set(key, nodes.clone(), None).await;
    }

    LeafOutcome {
        node_id,
        result,
        lookup: if cache.is_some() {
            CacheLookup::Miss
        } else {
            CacheLookup::Disabled
        },
        tokens,
    }
}

/// Applies an [`Operation`] to every leaf of a graph.
///
/// The executor owns no graph state. Each call rediscovers the leaves of
/// the graph it is given and returns the new nodes for the caller to merge.
/// Per-leaf failures are collected into the result; only engine faults are
/// returned as [`ExecutionError`].
pub struct Executor<T> {
    cache: Arc<NodeCache<T>>,
}

impl<T> Clone for Executor<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<T> Executor<T>
where
    T: Clone + EstimateSize + Send + Sync + 'static,
{
    pub fn new(cache: Arc<NodeCache<T>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<NodeCache<T>> {
        &self.cache
    }

    pub async fn execute(
        &self,
        graph: &Graph<T>,
        operation: Arc<dyn Operation<T>>,
        options: ExecutionOptions,
    ) -> Result<ExecutionResult<T>, ExecutionError> {
        let start = Instant::now();
        let leaves = graph.leaf_handles();
        if leaves.is_empty() {
            return Ok(ExecutionResult::empty());
        }

        let strategy = self.effective_strategy(options.strategy);
        let concurrency = match strategy {
            Strategy::Parallel { concurrency } => concurrency,
            _ => 1,
        };
        ExecutionStarted {
            operation: operation.name(),
            strategy: strategy.tag(),
            leaf_count: leaves.len(),
            concurrency,
        }
        .log();

        let cache = options.cache.then(|| self.cache.clone());
        let leaf_count = leaves.len();
        let outcomes = match strategy {
            Strategy::Parallel { concurrency } => {
                parallel::run(leaves, operation.clone(), cache, concurrency).await?
            }
            _ => sequential::run(&leaves, operation.as_ref(), cache.as_deref()).await,
        };

        let result = aggregate(operation.name(), leaf_count, outcomes, start);
        ExecutionCompleted {
            operation: operation.name(),
            nodes_processed: result.metrics.nodes_processed,
            nodes_created: result.metrics.nodes_created,
            failed: result.errors.len(),
            cache_hits: result.metrics.cache_hits,
            duration: result.metrics.duration,
        }
        .log();
        Ok(result)
    }

    /// Resolve the strategy that will actually run.
    fn effective_strategy(&self, requested: Strategy) -> Strategy {
        match requested {
            Strategy::Parallel { concurrency: 0 } => {
                ConcurrencyClamped {
                    requested: 0,
                    applied: 1,
                }
                .log();
                Strategy::Parallel { concurrency: 1 }
            }
            degraded if degraded.degrades_to_sequential() => {
                StrategyDegraded {
                    requested: degraded.tag(),
                    actual: Strategy::Sequential.tag(),
                }
                .log();
                Strategy::Sequential
            }
            other => other,
        }
    }

    /// Validate every leaf. An empty frontier is valid with a warning.
    pub fn validate(&self, graph: &Graph<T>, operation: &dyn Operation<T>) -> ValidationReport {
        let leaves = graph.leaves();
        if leaves.is_empty() {
            return ValidationReport::valid()
                .with_warning(format!("graph has no leaves for '{}'", operation.name()));
        }
        leaves
            .into_iter()
            .fold(ValidationReport::valid(), |mut report, leaf| {
                report.merge(operation.validate(leaf));
                report
            })
    }

    /// Estimate the cost of one sampled leaf and scale it by the leaf count.
    pub fn estimate_cost(&self, graph: &Graph<T>, operation: &dyn Operation<T>) -> CostEstimate {
        let leaves = graph.leaves();
        match leaves.first() {
            Some(sample) => operation.estimate_cost(sample).scaled(leaves.len()),
            None => CostEstimate::zero(),
        }
    }
}

fn aggregate<T>(
    operation: &str,
    leaf_count: usize,
    outcomes: Vec<LeafOutcome<T>>,
    start: Instant,
) -> ExecutionResult<T> {
    let mut result = ExecutionResult::empty();
    result.metrics.nodes_processed = leaf_count;

    for outcome in outcomes {
        match outcome.lookup {
            CacheLookup::Hit => result.metrics.cache_hits += 1,
            CacheLookup::Miss => result.metrics.cache_misses += 1,
            CacheLookup::Disabled => {}
        }
        result.metrics.tokens_consumed += outcome.tokens;

        match outcome.result {
            Ok(nodes) => result.new_nodes.extend(nodes),
            Err(error) => {
                LeafOperationFailed {
                    operation,
                    node_id: outcome.node_id.to_string(),
                    error: &error,
                }
                .log();
                result.errors.push(NodeFailure {
                    node_id: outcome.node_id,
                    operation: operation.to_string(),
                    error,
                });
            }
        }
    }

    result.metrics.nodes_created = result.new_nodes.len();
    result.metrics.duration = start.elapsed();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::operations::stub::ScriptedOperation;
    use crate::traits::Complexity;

    fn executor() -> Executor<String> {
        Executor::new(Arc::new(ResultCache::new(CacheConfig::default())))
    }

    #[tokio::test]
    async fn test_empty_graph_returns_empty_result() {
        let graph: Graph<String> = Graph::new();
        let result = executor()
            .execute(&graph, Arc::new(ScriptedOperation::new()), ExecutionOptions::default())
            .await
            .unwrap();

        assert!(result.new_nodes.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.metrics, ExecutionMetrics::default());
    }

    #[tokio::test]
    async fn test_cache_key_includes_operation_name() {
        let executor = executor();
        let graph = Graph::from_root(GraphNode::root("a b".to_string()));

        let first = ScriptedOperation::new().named("split");
        let second = ScriptedOperation::new().named("other");
        executor
            .execute(&graph, Arc::new(first), ExecutionOptions::default())
            .await
            .unwrap();
        let result = executor
            .execute(&graph, Arc::new(second), ExecutionOptions::default())
            .await
            .unwrap();

        assert_eq!(result.metrics.cache_hits, 0);
        assert_eq!(result.metrics.cache_misses, 1);
        assert_eq!(executor.cache().keys().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let executor = executor();
        let graph = Graph::from_root(GraphNode::root("bad".to_string()));
        let operation = Arc::new(ScriptedOperation::new().failing_on(&["bad"]));

        for _ in 0..2 {
            let result = executor
                .execute(&graph, operation.clone(), ExecutionOptions::default())
                .await
                .unwrap();
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.metrics.cache_misses, 1);
        }
        assert_eq!(operation.calls(), 2);
    }

    #[test]
    fn test_validate_empty_graph_is_valid_with_warning() {
        let graph: Graph<String> = Graph::new();
        let report = executor().validate(&graph, &ScriptedOperation::new());
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_validate_merges_leaf_reports() {
        let root = GraphNode::root("root".to_string());
        let graph = Graph::from_root(root.clone())
            .merge(vec![
                GraphNode::child_of(&root, "ok".to_string(), "split"),
                GraphNode::child_of(&root, String::new(), "split"),
            ])
            .unwrap();

        let report = executor().validate(&graph, &ScriptedOperation::new());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_estimate_cost_scales_sampled_leaf() {
        let root = GraphNode::root("root".to_string());
        let graph = Graph::from_root(root.clone())
            .merge((0..3).map(|i| GraphNode::child_of(&root, format!("leaf {i}"), "split")))
            .unwrap();

        let cost = executor().estimate_cost(&graph, &ScriptedOperation::new());
        assert_eq!(cost.token_cost, 3 * ScriptedOperation::TOKENS_PER_NODE);
        assert_eq!(cost.complexity, Complexity::Low);

        let empty: Graph<String> = Graph::new();
        assert_eq!(
            executor().estimate_cost(&empty, &ScriptedOperation::new()),
            CostEstimate::zero()
        );
    }
}
