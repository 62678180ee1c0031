// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::cache::EstimateSize;
use crate::engine::executor::{run_leaf, LeafOutcome, NodeCache};
use crate::errors::ExecutionError;
use crate::graph::GraphNode;
use crate::traits::Operation;

/// Process leaves as spawned tasks with at most `concurrency` in flight.
///
/// Each leaf's task does its own cache check and apply, so one leaf's output
/// stays grouped together. Outcomes are collected in spawn order, but callers
/// must not rely on that ordering. The first fatal error aborts every task
/// not yet awaited.
pub(crate) async fn run<T>(
    leaves: Vec<Arc<GraphNode<T>>>,
    operation: Arc<dyn Operation<T>>,
    cache: Option<Arc<NodeCache<T>>>,
    concurrency: usize,
) -> Result<Vec<LeafOutcome<T>>, ExecutionError>
where
    T: Clone + EstimateSize + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = Vec::with_capacity(leaves.len());

    for leaf in leaves {
        let operation = operation.clone();
        let cache = cache.clone();
        let semaphore = semaphore.clone();

        let task = tokio::spawn(async move {
            let _permit = semaphore.acquire().await.map_err(|e| {
                ExecutionError::Internal(format!(
                    "Failed to acquire semaphore permit for leaf {}: {}",
                    leaf.id(),
                    e
                ))
            })?;
            Ok::<_, ExecutionError>(run_leaf(&leaf, operation.as_ref(), cache.as_deref()).await)
        });
        tasks.push(task);
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    let mut pending = tasks.into_iter();
    while let Some(task) = pending.next() {
        let joined = match task.await {
            Ok(result) => result,
            Err(join_error) => Err(ExecutionError::TaskJoin(join_error.to_string())),
        };
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                // A fatal error leaves no leaf task running behind the caller.
                pending.for_each(|task| task.abort());
                return Err(e);
            }
        }
    }
    Ok(outcomes)
}
