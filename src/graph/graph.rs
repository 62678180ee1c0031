// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::GraphError;
use crate::graph::{GraphNode, NodeId};

/// Append-only DAG of [`GraphNode`]s with parent -> children adjacency.
///
/// Every mutation returns a new `Graph`; the receiver is left untouched.
/// Nodes are shared between versions through `Arc`, so a new version costs
/// a copy of the index maps, never of the node payloads.
///
/// Acyclicity holds by construction: a node may only name a parent that is
/// already present, and ids are never reused, so no edge can ever point
/// "backwards" into a node inserted later.
#[derive(Debug)]
pub struct Graph<T> {
    nodes: HashMap<NodeId, Arc<GraphNode<T>>>,
    children: HashMap<NodeId, Vec<NodeId>>,
    /// Insertion order, used as the graph iteration order.
    order: Vec<NodeId>,
}

impl<T> Clone for Graph<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            children: self.children.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            children: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build a graph holding a single root node.
    pub fn from_root(root: GraphNode<T>) -> Self {
        let mut graph = Self::new();
        let id = root.id();
        graph.nodes.insert(id, Arc::new(root));
        graph.order.push(id);
        graph
    }

    /// Return a new graph that also contains `node`.
    pub fn with_node(&self, node: GraphNode<T>) -> Result<Self, GraphError> {
        self.merge(std::iter::once(node))
    }

    /// Return a new graph with all `nodes` appended in order.
    ///
    /// A node may name as parent another node earlier in the same batch. The
    /// whole batch is rejected if any node is a duplicate or names a missing
    /// parent.
    pub fn merge<I>(&self, nodes: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = GraphNode<T>>,
    {
        let mut next = self.clone();
        for node in nodes {
            next.insert(node)?;
        }
        Ok(next)
    }

    fn insert(&mut self, node: GraphNode<T>) -> Result<(), GraphError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        if let Some(parent) = node.parent_id() {
            if !self.nodes.contains_key(&parent) {
                return Err(GraphError::MissingParent { node: id, parent });
            }
            self.children.entry(parent).or_default().push(id);
        }
        self.nodes.insert(id, Arc::new(node));
        self.order.push(id);
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&GraphNode<T>> {
        self.nodes.get(&id).map(|n| n.as_ref())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphNode<T>> {
        self.order
            .iter()
            .filter_map(move |id| self.nodes.get(id).map(|n| n.as_ref()))
    }

    /// Nodes with no children, in insertion order.
    ///
    /// Recomputed on every call with a full scan of the graph.
    pub fn leaves(&self) -> Vec<&GraphNode<T>> {
        self.iter()
            .filter(|node| {
                self.children
                    .get(&node.id())
                    .map_or(true, |children| children.is_empty())
            })
            .collect()
    }

    /// Shared handles to the current leaves, for handing to spawned tasks.
    pub(crate) fn leaf_handles(&self) -> Vec<Arc<GraphNode<T>>> {
        self.order
            .iter()
            .filter(|id| self.children.get(id).map_or(true, |c| c.is_empty()))
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect()
    }

    pub fn children(&self, id: NodeId) -> Vec<&GraphNode<T>> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| self.get(*c)).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<&GraphNode<T>> {
        self.get(id)
            .and_then(|node| node.parent_id())
            .and_then(|parent| self.get(parent))
    }

    /// Walk the lineage from `id` up to its root, nearest ancestor first.
    pub fn ancestors(&self, id: NodeId) -> Vec<&GraphNode<T>> {
        let mut lineage = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            lineage.push(node);
            current = self.parent(node.id());
        }
        lineage
    }
}
