// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised when appending nodes to a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node with this id is already part of the graph.
    #[error("Node {0} already exists in the graph")]
    DuplicateNode(NodeId),

    /// The node names a parent that is not (yet) in the graph.
    #[error("Node {node} declares parent {parent} which does not exist")]
    MissingParent { node: NodeId, parent: NodeId },
}
