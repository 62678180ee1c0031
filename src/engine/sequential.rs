// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::cache::EstimateSize;
use crate::engine::executor::{run_leaf, LeafOutcome, NodeCache};
use crate::graph::GraphNode;
use crate::traits::Operation;

/// Process leaves one at a time in the order given.
///
/// A failing leaf is recorded in its outcome and the loop moves on.
pub(crate) async fn run<T>(
    leaves: &[Arc<GraphNode<T>>],
    operation: &dyn Operation<T>,
    cache: Option<&NodeCache<T>>,
) -> Vec<LeafOutcome<T>>
where
    T: Clone + EstimateSize + Send + Sync,
{
    let mut outcomes = Vec::with_capacity(leaves.len());
    for leaf in leaves {
        outcomes.push(run_leaf(leaf, operation, cache).await);
    }
    outcomes
}
