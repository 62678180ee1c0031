// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::graph::NodeId;

/// A validation problem found for a node. Reported, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}{message}", node_prefix(.node_id))]
pub struct ValidationError {
    pub node_id: Option<NodeId>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            node_id: None,
            message: message.into(),
        }
    }

    pub fn for_node(node_id: NodeId, message: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id),
            message: message.into(),
        }
    }
}

fn node_prefix(node_id: &Option<NodeId>) -> String {
    match node_id {
        Some(id) => format!("node {}: ", id),
        None => String::new(),
    }
}
