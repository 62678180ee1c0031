// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::backends::local::LocalBackendFactory;
use crate::backends::{CachingBackend, CachingOptions, FallbackBackend};
use crate::cache::{CacheConfig, ResultCache};
use crate::engine::{ExecutionOptions, Executor, Strategy};
use crate::errors::ExecutionError;
use crate::graph::{Graph, GraphNode, NodeId};
use crate::operations::stub::ScriptedOperation;
use crate::operations::{AnalysisKind, AnalysisOperation, TextUnit, UnitKind};
use crate::traits::Operation;

/// Integration tests for the executor over real graphs, local backends and
/// backend combinators
#[cfg(test)]
mod tests {
    use super::*;

    fn executor<T>() -> Executor<T>
    where
        T: Clone + crate::cache::EstimateSize + Send + Sync + 'static,
    {
        Executor::new(Arc::new(ResultCache::new(CacheConfig::default())))
    }

    /// A root with one child per entry of `leaves`.
    fn fan_out(leaves: &[&str]) -> Graph<String> {
        let root = GraphNode::root("root".to_string());
        Graph::from_root(root.clone())
            .merge(
                leaves
                    .iter()
                    .map(|text| GraphNode::child_of(&root, text.to_string(), "seed")),
            )
            .unwrap()
    }

    fn texts(nodes: &[GraphNode<String>]) -> Vec<&str> {
        nodes.iter().map(|n| n.data().as_str()).collect()
    }

    #[tokio::test]
    async fn test_five_leaves_with_two_failures_sequential() {
        let graph = fan_out(&["a", "b", "c", "d", "e"]);
        let operation = Arc::new(ScriptedOperation::new().failing_on(&["b", "d"]));

        let result = executor()
            .execute(&graph, operation, ExecutionOptions::sequential())
            .await
            .unwrap();

        assert_eq!(result.errors.len(), 2);
        assert_eq!(texts(&result.new_nodes), vec!["a", "c", "e"]);
        assert_eq!(result.metrics.nodes_processed, 5);
        assert_eq!(result.metrics.nodes_created, 3);

        let failed: Vec<&str> = result
            .errors
            .iter()
            .map(|f| graph.get(f.node_id).unwrap().data().as_str())
            .collect();
        assert_eq!(failed, vec!["b", "d"]);
        assert!(result.errors.iter().all(|f| f.operation == "split"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successful_outputs() {
        let graph = fan_out(&["fail here", "keep these words"]);
        let operation = Arc::new(ScriptedOperation::new().failing_on(&["fail here"]));

        let result = executor()
            .execute(&graph, operation, ExecutionOptions::parallel(2))
            .await
            .unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(texts(&result.new_nodes), vec!["keep", "these", "words"]);
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_nodes_processed_matches_leaf_count() {
        struct TestCase {
            name: &'static str,
            graph: Graph<String>,
        }

        let root = GraphNode::root("one two".to_string());
        let mid = GraphNode::child_of(&root, "three four".to_string(), "seed");
        let chain = Graph::from_root(root.clone())
            .merge(vec![mid.clone(), GraphNode::child_of(&mid, "five".to_string(), "seed")])
            .unwrap();

        let cases = vec![
            TestCase {
                name: "single root",
                graph: Graph::from_root(GraphNode::root("solo".to_string())),
            },
            TestCase {
                name: "chain",
                graph: chain,
            },
            TestCase {
                name: "fan out",
                graph: fan_out(&["x", "y", "z", "w"]),
            },
        ];

        for case in cases {
            for options in [ExecutionOptions::sequential(), ExecutionOptions::parallel(3)] {
                let result = executor()
                    .execute(&case.graph, Arc::new(ScriptedOperation::new()), options)
                    .await
                    .unwrap();
                assert_eq!(
                    result.metrics.nodes_processed,
                    case.graph.leaves().len(),
                    "{} with {}",
                    case.name,
                    options.strategy
                );
            }
        }
    }

    #[tokio::test]
    async fn test_repeat_execution_is_served_from_cache() {
        let executor = executor();
        let graph = fan_out(&["a b", "c", "d e f"]);
        let operation = Arc::new(ScriptedOperation::new());

        let first = executor
            .execute(&graph, operation.clone(), ExecutionOptions::default())
            .await
            .unwrap();
        let second = executor
            .execute(&graph, operation.clone(), ExecutionOptions::default())
            .await
            .unwrap();

        assert_eq!(first.metrics.cache_misses, 3);
        assert_eq!(second.metrics.cache_hits, 3);
        assert_eq!(second.metrics.cache_misses, 0);
        assert_eq!(second.metrics.tokens_consumed, 0);
        assert_eq!(operation.calls(), 3);

        let first_ids: Vec<NodeId> = first.new_nodes.iter().map(|n| n.id()).collect();
        let second_ids: Vec<NodeId> = second.new_nodes.iter().map(|n| n.id()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn test_disabled_cache_never_hits() {
        let executor = executor();
        let graph = fan_out(&["a", "b"]);
        let operation = Arc::new(ScriptedOperation::new());
        let options = ExecutionOptions::default().with_cache(false);

        for _ in 0..3 {
            let result = executor
                .execute(&graph, operation.clone(), options)
                .await
                .unwrap();
            assert_eq!(result.metrics.cache_hits, 0);
            assert_eq!(result.metrics.cache_misses, 0);
            assert_eq!(
                result.metrics.tokens_consumed,
                2 * ScriptedOperation::TOKENS_PER_NODE
            );
        }
        assert_eq!(operation.calls(), 6);
        assert!(executor.cache().keys().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_bounds_in_flight_operations() {
        let leaves: Vec<String> = (0..8).map(|i| format!("w{i}a w{i}b")).collect();
        let leaf_refs: Vec<&str> = leaves.iter().map(String::as_str).collect();
        let graph = fan_out(&leaf_refs);
        let operation = Arc::new(ScriptedOperation::new().with_delay(Duration::from_millis(20)));

        let result = executor()
            .execute(&graph, operation.clone(), ExecutionOptions::parallel(2))
            .await
            .unwrap();

        assert_eq!(operation.calls(), 8);
        assert!(operation.max_in_flight() <= 2);
        assert_eq!(result.metrics.nodes_created, 16);

        // Each leaf's children stay adjacent in the aggregated output.
        let parents: Vec<NodeId> = result
            .new_nodes
            .iter()
            .filter_map(|n| n.parent_id())
            .collect();
        for pair in parents.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
        let distinct: HashSet<NodeId> = parents.into_iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let graph = fan_out(&["a", "b", "c"]);
        let result = executor()
            .execute(
                &graph,
                Arc::new(ScriptedOperation::new()),
                ExecutionOptions::parallel(0),
            )
            .await
            .unwrap();
        assert_eq!(texts(&result.new_nodes), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_parallel_panic_is_fatal_and_stops_remaining_leaves() {
        let executor = executor();
        let graph = fan_out(&["boom", "a", "b", "c"]);
        let operation = Arc::new(
            ScriptedOperation::new()
                .panicking_on(&["boom"])
                .with_delay(Duration::from_millis(30)),
        );

        let err = executor
            .execute(&graph, operation.clone(), ExecutionOptions::parallel(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::TaskJoin(_)));

        let calls_at_return = operation.calls();
        let keys_at_return = executor.cache().keys().await.len();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(operation.calls(), calls_at_return);
        assert_eq!(executor.cache().keys().await.len(), keys_at_return);
    }

    #[tokio::test]
    async fn test_batch_and_streaming_match_sequential() {
        let graph = fan_out(&["one two", "three", "four five"]);

        let sequential = executor()
            .execute(
                &graph,
                Arc::new(ScriptedOperation::new()),
                ExecutionOptions::sequential(),
            )
            .await
            .unwrap();

        for strategy in [Strategy::Batch, Strategy::Streaming] {
            let result = executor()
                .execute(
                    &graph,
                    Arc::new(ScriptedOperation::new()),
                    ExecutionOptions::default().with_strategy(strategy),
                )
                .await
                .unwrap();
            assert_eq!(
                texts(&result.new_nodes),
                texts(&sequential.new_nodes),
                "{}",
                strategy
            );
            assert_eq!(result.metrics.nodes_processed, 3);
        }
    }

    #[tokio::test]
    async fn test_text_pipeline_rounds_grow_lineage() {
        let backend = FallbackBackend::compose(
            &LocalBackendFactory::new("whitespace"),
            &LocalBackendFactory::new("rule_based"),
        )
        .await
        .unwrap();
        let backend = Arc::new(CachingBackend::new(backend, &CachingOptions::default()));
        let executor = executor::<TextUnit>();

        let document =
            GraphNode::root(TextUnit::document("Ada wrote code. Babbage built engines."));
        let document_id = document.id();
        let mut graph = Graph::from_root(document);

        for kind in [AnalysisKind::Sentencize, AnalysisKind::Tokenize] {
            let operation: Arc<dyn Operation<TextUnit>> =
                Arc::new(AnalysisOperation::new(kind, backend.clone()));
            assert!(executor.validate(&graph, operation.as_ref()).valid);

            let result = executor
                .execute(&graph, operation, ExecutionOptions::parallel(2))
                .await
                .unwrap();
            assert!(result.is_success(), "{:?}", result.errors);
            graph = graph.merge(result.new_nodes).unwrap();
        }

        // whitespace serves tokenize, rule_based answers sentencize through the fallback
        let leaves = graph.leaves();
        let tokens: Vec<&str> = leaves.iter().map(|n| n.data().text.as_str()).collect();
        assert_eq!(
            tokens,
            vec!["Ada", "wrote", "code.", "Babbage", "built", "engines."]
        );
        assert!(leaves.iter().all(|n| n.data().kind == UnitKind::Token));

        let lineage = graph.ancestors(leaves[0].id());
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage[0].data().kind, UnitKind::Sentence);
        assert_eq!(lineage[1].id(), document_id);
    }

    #[tokio::test]
    async fn test_missing_capability_fails_per_leaf() {
        let backend = LocalBackendFactory::create_backend("whitespace").unwrap();
        let operation = Arc::new(AnalysisOperation::new(AnalysisKind::Lemmatize, backend));
        let graph = Graph::from_root(GraphNode::root(TextUnit::document("dogs barked")));
        let executor = executor::<TextUnit>();

        let report = executor.validate(&graph, operation.as_ref());
        assert!(!report.valid);

        let result = executor
            .execute(&graph, operation, ExecutionOptions::default())
            .await
            .unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(result.new_nodes.is_empty());
        assert_eq!(result.metrics.nodes_processed, 1);
    }
}
