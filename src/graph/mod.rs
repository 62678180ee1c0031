// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Append-only node graph that operations grow one frontier at a time.

#[allow(clippy::module_inception)]
mod graph;
mod node;

pub use graph::Graph;
pub use node::{GraphNode, NodeId};
