// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Deterministic operations over plain string graphs for engine tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::{OperationError, ValidationError};
use crate::graph::GraphNode;
use crate::traits::{Complexity, CostEstimate, Operation, ValidationReport};

/// Splits a node's text on whitespace into one child per word.
///
/// Can be told to fail or panic on specific inputs and to sleep inside
/// `apply`, and records how many invocations were in flight at once.
pub struct ScriptedOperation {
    name: String,
    fail_on: HashSet<String>,
    panic_on: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedOperation {
    pub const TOKENS_PER_NODE: u64 = 5;

    pub fn new() -> Self {
        Self {
            name: "split".to_string(),
            fail_on: HashSet::new(),
            panic_on: HashSet::new(),
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn failing_on(mut self, inputs: &[&str]) -> Self {
        self.fail_on = inputs.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn panicking_on(mut self, inputs: &[&str]) -> Self {
        self.panic_on = inputs.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Operation<String> for ScriptedOperation {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(
        &self,
        node: &GraphNode<String>,
    ) -> Result<Vec<GraphNode<String>>, OperationError> {
        if self.panic_on.contains(node.data()) {
            panic!("scripted panic on '{}'", node.data());
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.contains(node.data()) {
            return Err(OperationError::failed(
                &self.name,
                format!("refusing '{}'", node.data()),
            ));
        }
        Ok(node
            .data()
            .split_whitespace()
            .map(|word| GraphNode::child_of(node, word.to_string(), self.name.as_str()))
            .collect())
    }

    fn validate(&self, node: &GraphNode<String>) -> ValidationReport {
        if node.data().is_empty() {
            ValidationReport::valid()
                .with_error(ValidationError::for_node(node.id(), "empty text"))
        } else {
            ValidationReport::valid()
        }
    }

    fn estimate_cost(&self, _node: &GraphNode<String>) -> CostEstimate {
        CostEstimate {
            estimated_time: Duration::from_millis(1),
            complexity: Complexity::Low,
            token_cost: Self::TOKENS_PER_NODE,
        }
    }
}
