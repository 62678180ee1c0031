// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod backend;
mod config;
mod execution;
mod graph;
mod validation;

pub use backend::{BackendError, BackendResult};
pub use config::ConfigError;
pub use execution::{ExecutionError, NodeFailure, OperationError};
pub use graph::GraphError;
pub use validation::ValidationError;
