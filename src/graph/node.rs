// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::cache::EstimateSize;

/// Opaque node identifier, stable for the lifetime of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// An immutable node in the graph.
///
/// Nodes are created either explicitly (roots, via [`GraphNode::root`]) or by
/// an operation deriving children from an existing node (via
/// [`GraphNode::child_of`]). Fields are private so a node cannot change once
/// it has been built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode<T> {
    id: NodeId,
    data: T,
    parent_id: Option<NodeId>,
    operation_tag: Option<String>,
    created_at: DateTime<Utc>,
}

impl<T> GraphNode<T> {
    /// Create a parentless node.
    pub fn root(data: T) -> Self {
        Self {
            id: NodeId::new(),
            data,
            parent_id: None,
            operation_tag: None,
            created_at: Utc::now(),
        }
    }

    /// Create a node derived from `parent` by the operation named `operation_tag`.
    pub fn child_of<P>(parent: &GraphNode<P>, data: T, operation_tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            data,
            parent_id: Some(parent.id),
            operation_tag: Some(operation_tag.into()),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn operation_tag(&self) -> Option<&str> {
        self.operation_tag.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl<T: EstimateSize> EstimateSize for GraphNode<T> {
    fn estimated_size(&self) -> usize {
        // id (16) + optional parent (16) + timestamp (12)
        44 + self.data.estimated_size() + self.operation_tag.estimated_size()
    }
}
