// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for executor lifecycle and execution events.
//!
//! This module contains message types for logging events related to:
//! * Execution lifecycle (start, completion)
//! * Strategy degradation and concurrency clamping
//! * Per-leaf operation failures

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Execution started over the current frontier.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionStarted<'a> {
    pub operation: &'a str,
    pub strategy: &'a str,
    pub leaf_count: usize,
    pub concurrency: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Applying '{}' to {} leaves with {} strategy (concurrency={})",
            self.operation, self.leaf_count, self.strategy, self.concurrency
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            operation = self.operation,
            strategy = self.strategy,
            leaf_count = self.leaf_count,
            concurrency = self.concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            operation = self.operation,
            strategy = self.strategy,
            leaf_count = self.leaf_count,
        )
    }
}

/// Execution finished; per-leaf failures, if any, are counted in `failed`.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionCompleted<'a> {
    pub operation: &'a str,
    pub nodes_processed: usize,
    pub nodes_created: usize,
    pub failed: usize,
    pub cache_hits: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' processed {} leaves in {:?}: {} nodes created, {} failed, {} cache hits",
            self.operation,
            self.nodes_processed,
            self.duration,
            self.nodes_created,
            self.failed,
            self.cache_hits
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            operation = self.operation,
            nodes_processed = self.nodes_processed,
            nodes_created = self.nodes_created,
            failed = self.failed,
            cache_hits = self.cache_hits,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            operation = self.operation,
            nodes_processed = self.nodes_processed,
            duration = ?self.duration,
        )
    }
}

/// The requested strategy has no dedicated implementation and runs sequentially.
///
/// # Log Level
/// `warn!` - Behavior differs from what was asked for
pub struct StrategyDegraded<'a> {
    pub requested: &'a str,
    pub actual: &'a str,
}

impl Display for StrategyDegraded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Strategy '{}' is not implemented separately; running with '{}' semantics",
            self.requested, self.actual
        )
    }
}

impl StructuredLog for StrategyDegraded<'_> {
    fn log(&self) {
        tracing::warn!(requested = self.requested, actual = self.actual, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "strategy_degraded",
            span_name = name,
            requested = self.requested,
            actual = self.actual,
        )
    }
}

/// A parallel concurrency limit of zero was raised to one.
///
/// # Log Level
/// `warn!` - Configuration was adjusted
pub struct ConcurrencyClamped {
    pub requested: usize,
    pub applied: usize,
}

impl Display for ConcurrencyClamped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parallel concurrency {} is invalid; using {}",
            self.requested, self.applied
        )
    }
}

impl StructuredLog for ConcurrencyClamped {
    fn log(&self) {
        tracing::warn!(requested = self.requested, applied = self.applied, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "concurrency_clamped",
            span_name = name,
            requested = self.requested,
            applied = self.applied,
        )
    }
}

/// An operation failed on one leaf; the batch continues.
///
/// # Log Level
/// `warn!` - Recovered, recorded in the execution result
pub struct LeafOperationFailed<'a> {
    pub operation: &'a str,
    pub node_id: String,
    pub error: &'a dyn std::error::Error,
}

impl Display for LeafOperationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operation '{}' failed on leaf {}: {}",
            self.operation, self.node_id, self.error
        )
    }
}

impl StructuredLog for LeafOperationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            node_id = %self.node_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "leaf_operation_failed",
            span_name = name,
            operation = self.operation,
            node_id = %self.node_id,
        )
    }
}
