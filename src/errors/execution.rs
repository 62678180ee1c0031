// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while applying operations across a graph frontier.
//!
//! Two tiers exist. [`ExecutionError`] is fatal and aborts a whole `execute`
//! call; it is reserved for engine faults and bad options. [`OperationError`]
//! is local to one leaf: the executor catches it, wraps it in a
//! [`NodeFailure`], and keeps going with the remaining leaves.

use thiserror::Error;

use crate::errors::BackendError;
use crate::graph::NodeId;

/// Engine-level failure that aborts an `execute` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// A strategy tag that the engine does not recognise.
    #[error("Unknown execution strategy '{0}' (expected one of: sequential, parallel, batch, streaming)")]
    UnknownStrategy(String),

    /// A spawned leaf task panicked or was cancelled.
    #[error("Task join error: {0}")]
    TaskJoin(String),

    /// Unexpected internal fault.
    #[error("Internal execution error: {0}")]
    Internal(String),
}

/// Failure of a single operation invocation on a single node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    /// The backend behind the operation failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Any other failure raised by the operation itself.
    #[error("Operation '{operation}' failed: {message}")]
    Failed { operation: String, message: String },
}

impl OperationError {
    pub fn failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A per-leaf failure recorded in an execution result.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Operation '{operation}' failed on node {node_id}: {error}")]
pub struct NodeFailure {
    pub node_id: NodeId,
    pub operation: String,
    #[source]
    pub error: OperationError,
}
