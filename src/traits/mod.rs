// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backend;
pub mod operation;

pub use backend::{Backend, BackendCapabilities, BackendFactory, Capability};
pub use operation::{Complexity, CostEstimate, Operation, ValidationReport};
