// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::errors::{OperationError, ValidationError};
use crate::graph::GraphNode;

/// A named transformation from one node to zero or more new child nodes.
///
/// `apply` is the only place an operation may suspend; it is where calls
/// into a backend happen. `validate` and `estimate_cost` are synchronous
/// inspections of the node and must not touch a backend.
#[async_trait]
pub trait Operation<T>: Send + Sync {
    fn name(&self) -> &str;

    /// Derive new nodes from `node`. Returned nodes should name `node` as their parent.
    async fn apply(&self, node: &GraphNode<T>) -> Result<Vec<GraphNode<T>>, OperationError>;

    fn validate(&self, _node: &GraphNode<T>) -> ValidationReport {
        ValidationReport::valid()
    }

    fn estimate_cost(&self, node: &GraphNode<T>) -> CostEstimate;
}

/// Outcome of validating one or more nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: ValidationError) -> Self {
        self.valid = false;
        self.errors.push(error);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Fold another report into this one. Validity is the AND of both.
    pub fn merge(&mut self, other: ValidationReport) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Coarse complexity class reported by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Estimated resources needed to apply an operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    pub estimated_time: Duration,
    pub complexity: Complexity,
    pub token_cost: u64,
}

impl CostEstimate {
    pub fn zero() -> Self {
        Self {
            estimated_time: Duration::ZERO,
            complexity: Complexity::Low,
            token_cost: 0,
        }
    }

    /// Linear extrapolation of a single-node estimate to `count` nodes.
    pub fn scaled(&self, count: usize) -> Self {
        Self {
            estimated_time: self.estimated_time.saturating_mul(count as u32),
            complexity: self.complexity,
            token_cost: self.token_cost.saturating_mul(count as u64),
        }
    }
}
